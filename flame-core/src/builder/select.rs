use crate::{
    Column, ComparisonOp, Conjunction, Context, Filter, Grammar, Join, JoinCondition, JoinType,
    Order, Ordered, Parameters, Predicate, QueryBuilder, SelectParts, TableRef, Value,
    WhereClause,
};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// SELECT statement builder.
///
/// ```rust,ignore
/// let (sql, parameters) = connection
///     .select(["id", "name"])
///     .from("users")
///     .where_gt("age", 18)
///     .order_by("name", Order::ASC)
///     .limit(10)
///     .build();
/// ```
#[derive(Clone)]
pub struct SelectQuery {
    grammar: Arc<dyn Grammar>,
    parts: SelectParts,
    bound: Parameters,
}

impl SelectQuery {
    /// Selects every column (`*`) until columns are added.
    pub fn new<C: Into<Column>>(
        grammar: Arc<dyn Grammar>,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            grammar,
            parts: SelectParts {
                columns: columns.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
            bound: Parameters::new(),
        }
    }

    pub fn parts(&self) -> &SelectParts {
        &self.parts
    }

    pub fn distinct(mut self) -> Self {
        self.parts.distinct = true;
        self
    }

    pub fn columns<C: Into<Column>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.parts
            .columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn column_as(mut self, column: impl Into<String>, alias: impl Into<String>) -> Self {
        self.parts.columns.push(Column::Identifier {
            name: column.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// Expression written verbatim (`COUNT(*)`, `price * :rate`), optionally aliased.
    pub fn column_raw(mut self, sql: impl Into<String>, alias: Option<&str>) -> Self {
        self.parts.columns.push(Column::Raw {
            sql: sql.into(),
            alias: alias.map(Into::into),
        });
        self
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.parts.from = Some(TableRef::new(table));
        self
    }

    pub fn from_as(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.parts.from = Some(TableRef::aliased(table, alias));
        self
    }

    pub fn join_with(mut self, join: Join) -> Self {
        self.parts.joins.push(join);
        self
    }

    /// `INNER JOIN table ON lhs = rhs`
    pub fn join(
        self,
        table: impl Into<TableRef>,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        self.join_on(JoinType::Inner, table, lhs, rhs)
    }

    pub fn left_join(
        self,
        table: impl Into<TableRef>,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        self.join_on(JoinType::Left, table, lhs, rhs)
    }

    pub fn right_join(
        self,
        table: impl Into<TableRef>,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        self.join_on(JoinType::Right, table, lhs, rhs)
    }

    pub fn cross_join(self, table: impl Into<TableRef>) -> Self {
        self.join_with(Join {
            join: JoinType::Cross,
            table: table.into(),
            on: None,
        })
    }

    /// Join with a condition written verbatim.
    pub fn join_raw(self, join: JoinType, table: impl Into<TableRef>, on: impl Into<String>) -> Self {
        self.join_with(Join {
            join,
            table: table.into(),
            on: Some(JoinCondition::Raw(on.into())),
        })
    }

    fn join_on(
        self,
        join: JoinType,
        table: impl Into<TableRef>,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        self.join_with(Join {
            join,
            table: table.into(),
            on: Some(JoinCondition::Columns(lhs.into(), rhs.into())),
        })
    }

    pub fn group_by<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.parts
            .group_by
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn having_predicate(mut self, conjunction: Conjunction, predicate: Predicate) -> Self {
        self.parts.having.push(conjunction, predicate);
        self
    }

    pub fn having_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.having_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Equal, value),
        )
    }

    pub fn having_gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.having_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Greater, value),
        )
    }

    pub fn having_lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.having_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Less, value),
        )
    }

    /// Aggregate conditions are usually expressions: `COUNT(*) > :min`.
    pub fn having_raw(self, sql: impl Into<String>) -> Self {
        self.having_predicate(Conjunction::And, Predicate::Raw(sql.into()))
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.parts.order_by.push(Ordered {
            column: column.into(),
            order,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.parts.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.parts.offset = Some(offset);
        self
    }

    /// Value of a placeholder written in a raw fragment.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bound.insert(name, value);
        self
    }
}

impl WhereClause for SelectQuery {
    fn filter_mut(&mut self) -> &mut Filter {
        &mut self.parts.filter
    }
}

impl QueryBuilder for SelectQuery {
    fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_dyn()
    }
    fn bound(&self) -> &Parameters {
        &self.bound
    }
    fn write_query(&self, context: &mut Context, out: &mut String) {
        self.grammar.write_select(context, out, &self.parts);
    }
}

impl Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().0)
    }
}
