//! Fluent SELECT, INSERT and UPDATE builders.
//!
//! Builders collect clause descriptors and render them through the
//! [`Grammar`] of the connection that created them. Values given to a
//! builder become generated named parameters, raw fragments may carry their
//! own placeholders whose values are supplied with `bind`.

mod clause;
mod insert;
mod select;
mod update;

pub use clause::*;
pub use insert::*;
pub use select::*;
pub use update::*;

use crate::{Connection, Context, Driver, Fragment, Grammar, Parameters, QueryResult, Result, Value};

/// Render a statement and run it.
///
/// `build` and `execute` consume the builder, a rendered builder cannot be
/// modified into another statement.
pub trait QueryBuilder {
    fn grammar(&self) -> &dyn Grammar;

    /// Values bound explicitly with `bind`.
    fn bound(&self) -> &Parameters;

    /// Write the statement with named placeholders.
    fn write_query(&self, context: &mut Context, out: &mut String);

    /// SQL text and parameters, without consuming the builder.
    fn render(&self) -> (String, Parameters) {
        let mut context = Context::with_parameters(Fragment::None, self.bound().clone());
        let mut out = String::with_capacity(128);
        self.write_query(&mut context, &mut out);
        (out, context.parameters)
    }

    /// SQL text with named placeholders and the values of every placeholder.
    fn build(self) -> (String, Parameters)
    where
        Self: Sized,
    {
        self.render()
    }

    /// Render the statement and run it on `connection`.
    fn execute<D: Driver>(self, connection: &mut Connection<D>) -> Result<QueryResult>
    where
        Self: Sized,
    {
        let (sql, parameters) = self.build();
        connection.query(&sql, &parameters)
    }
}

/// WHERE clause methods shared by the builders that filter rows.
///
/// Conditions are joined with AND, the `or_` variants join with OR. Precedence
/// is left to right, use `where_group` for explicit parentheses.
pub trait WhereClause: Sized {
    fn filter_mut(&mut self) -> &mut Filter;

    fn where_predicate(mut self, conjunction: Conjunction, predicate: Predicate) -> Self {
        self.filter_mut().push(conjunction, predicate);
        self
    }

    fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Equal, value),
        )
    }
    fn where_ne(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::NotEqual, value),
        )
    }
    fn where_lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Less, value),
        )
    }
    fn where_gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Greater, value),
        )
    }
    fn where_le(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::LessEqual, value),
        )
    }
    fn where_ge(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::GreaterEqual, value),
        )
    }
    fn where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::Like, pattern),
        )
    }
    fn where_not_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::compare(column, ComparisonOp::NotLike, pattern),
        )
    }
    fn where_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_predicate(Conjunction::And, in_predicate(column, values, false))
    }
    fn where_not_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_predicate(Conjunction::And, in_predicate(column, values, true))
    }
    fn where_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::Between {
                column: column.into(),
                low: low.into(),
                high: high.into(),
                negated: false,
            },
        )
    }
    fn where_null(self, column: impl Into<String>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::Null {
                column: column.into(),
                negated: false,
            },
        )
    }
    fn where_not_null(self, column: impl Into<String>) -> Self {
        self.where_predicate(
            Conjunction::And,
            Predicate::Null {
                column: column.into(),
                negated: true,
            },
        )
    }
    /// Condition written verbatim, it may use named placeholders bound with `bind`.
    fn where_raw(self, sql: impl Into<String>) -> Self {
        self.where_predicate(Conjunction::And, Predicate::Raw(sql.into()))
    }
    /// Parenthesized group of conditions built by `group`.
    fn where_group(self, group: impl FnOnce(Filter) -> Filter) -> Self {
        self.where_predicate(Conjunction::And, Predicate::Group(group(Filter::new())))
    }

    fn or_where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::compare(column, ComparisonOp::Equal, value),
        )
    }
    fn or_where_ne(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::compare(column, ComparisonOp::NotEqual, value),
        )
    }
    fn or_where_lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::compare(column, ComparisonOp::Less, value),
        )
    }
    fn or_where_gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::compare(column, ComparisonOp::Greater, value),
        )
    }
    fn or_where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::compare(column, ComparisonOp::Like, pattern),
        )
    }
    fn or_where_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_predicate(Conjunction::Or, in_predicate(column, values, false))
    }
    fn or_where_null(self, column: impl Into<String>) -> Self {
        self.where_predicate(
            Conjunction::Or,
            Predicate::Null {
                column: column.into(),
                negated: false,
            },
        )
    }
    fn or_where_raw(self, sql: impl Into<String>) -> Self {
        self.where_predicate(Conjunction::Or, Predicate::Raw(sql.into()))
    }
    fn or_where_group(self, group: impl FnOnce(Filter) -> Filter) -> Self {
        self.where_predicate(Conjunction::Or, Predicate::Group(group(Filter::new())))
    }
}

fn in_predicate<V: Into<Value>>(
    column: impl Into<String>,
    values: impl IntoIterator<Item = V>,
    negated: bool,
) -> Predicate {
    Predicate::In {
        column: column.into(),
        values: values.into_iter().map(Into::into).collect(),
        negated,
    }
}
