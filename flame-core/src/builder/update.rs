use crate::{
    Assignment, Context, Filter, Grammar, Order, Ordered, Parameters, QueryBuilder, UpdateParts,
    Value, WhereClause,
};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// UPDATE statement builder.
#[derive(Clone)]
pub struct UpdateQuery {
    grammar: Arc<dyn Grammar>,
    parts: UpdateParts,
    bound: Parameters,
}

impl UpdateQuery {
    pub fn new<K: Into<String>, V: Into<Value>>(
        grammar: Arc<dyn Grammar>,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let mut result = Self {
            grammar,
            parts: UpdateParts {
                table: table.into(),
                ..Default::default()
            },
            bound: Parameters::new(),
        };
        for (column, value) in columns {
            result = result.set(column, value);
        }
        result
    }

    pub fn parts(&self) -> &UpdateParts {
        &self.parts
    }

    /// `column = value`, replacing a previous assignment of the same column.
    pub fn set(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assign(column.into(), Assignment::Value(value.into()))
    }

    /// `column = <sql>` with the right hand side written verbatim (`count + 1`).
    pub fn set_raw(self, column: impl Into<String>, sql: impl Into<String>) -> Self {
        self.assign(column.into(), Assignment::Raw(sql.into()))
    }

    fn assign(mut self, column: String, assignment: Assignment) -> Self {
        match self.parts.assignments.iter_mut().find(|(c, _)| *c == column) {
            Some((_, current)) => *current = assignment,
            None => self.parts.assignments.push((column, assignment)),
        }
        self
    }

    /// Written only by grammars supporting it (MySQL), others drop it.
    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.parts.order_by.push(Ordered {
            column: column.into(),
            order,
        });
        self
    }

    /// Written only by grammars supporting it (MySQL), others drop it.
    pub fn limit(mut self, limit: u64) -> Self {
        self.parts.limit = Some(limit);
        self
    }

    /// Value of a placeholder written in a raw fragment.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bound.insert(name, value);
        self
    }
}

impl WhereClause for UpdateQuery {
    fn filter_mut(&mut self) -> &mut Filter {
        &mut self.parts.filter
    }
}

impl QueryBuilder for UpdateQuery {
    fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_dyn()
    }
    fn bound(&self) -> &Parameters {
        &self.bound
    }
    fn write_query(&self, context: &mut Context, out: &mut String) {
        self.grammar.write_update(context, out, &self.parts);
    }
}

impl Display for UpdateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().0)
    }
}
