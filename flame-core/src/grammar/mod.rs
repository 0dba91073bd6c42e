mod context;
mod generic;
mod mysql;

pub use context::*;
pub use generic::*;
pub use mysql::*;

use crate::{
    Assignment, Column, ComparisonOp, Conjunction, Filter, InsertParts, Join, JoinCondition,
    JoinType, Order, Ordered, ParamType, Predicate, SelectParts, TableRef, UpdateParts, Value,
    possibly_parenthesized, separated_by,
};
use std::fmt::Write;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Dialect printer turning builder clause descriptors into SQL text.
///
/// Values are never inlined: each one becomes a generated named parameter
/// (`i:p1`, `:p2`, ...) recorded in the [`Context`], so the output goes
/// through the placeholder compiler like hand-written SQL does.
///
/// Every method has a default producing ANSI SQL, dialects override the ones
/// that differ. Implementations hold no per-render state and are shared
/// across threads.
pub trait Grammar: Send + Sync {
    fn as_dyn(&self) -> &dyn Grammar;

    /// Whether the current fragment context allows alias declaration.
    fn alias_declaration(&self, context: &mut Context) -> bool {
        matches!(
            context.fragment,
            Fragment::SqlSelect | Fragment::SqlSelectFrom | Fragment::SqlJoin
        )
    }

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote a single identifier ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    /// Quote a possibly qualified identifier: every dot separated part is
    /// quoted on its own, `*` is left as it is.
    fn write_identifier(&self, context: &mut Context, out: &mut String, value: &str) {
        separated_by(
            out,
            value.split('.'),
            |out, part| {
                if part == "*" {
                    out.push('*');
                } else {
                    self.write_identifier_quoted(context, out, part);
                }
            },
            ".",
        );
    }

    /// Quoted form of `value`, see [`write_identifier`](Grammar::write_identifier).
    ///
    /// Quoting is not idempotent: quoting an already quoted identifier
    /// escapes its quotes again.
    fn quote_identifier(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        self.write_identifier(&mut Context::default(), &mut out, value);
        out
    }

    /// Write `value` as a generated named parameter, tagged with the type of the value.
    fn write_parameter(&self, context: &mut Context, out: &mut String, value: &Value) {
        let name = context.next_parameter_name();
        out.push_str(ParamType::of_value(value).prefix());
        out.push(':');
        out.push_str(&name);
        context.parameters.insert(name, value.clone());
    }

    fn write_alias(&self, context: &mut Context, out: &mut String, alias: &Option<String>) {
        if let Some(alias) = alias {
            out.push_str(" AS ");
            self.write_identifier_quoted(context, out, alias);
        }
    }

    /// Render a table reference with optional alias.
    fn write_table_ref(&self, context: &mut Context, out: &mut String, value: &TableRef) {
        self.write_identifier(context, out, &value.name);
        if let Some(alias) = &value.alias
            && self.alias_declaration(context)
        {
            out.push(' ');
            self.write_identifier_quoted(context, out, alias);
        }
    }

    fn write_column(&self, context: &mut Context, out: &mut String, value: &Column) {
        match value {
            Column::Identifier { name, alias } => {
                self.write_identifier(context, out, name);
                self.write_alias(context, out, alias);
            }
            Column::Raw { sql, alias } => {
                out.push_str(sql);
                self.write_alias(context, out, alias);
            }
        }
    }

    /// Render the projection list, `*` when there are no columns.
    fn write_columns(&self, context: &mut Context, out: &mut String, columns: &[Column]) {
        if columns.is_empty() {
            out.push('*');
            return;
        }
        separated_by(
            out,
            columns,
            |out, column| self.write_column(context, out, column),
            ", ",
        );
    }

    fn write_comparison_op(&self, _context: &mut Context, out: &mut String, value: &ComparisonOp) {
        out.push_str(match value {
            ComparisonOp::Equal => " = ",
            ComparisonOp::NotEqual => " <> ",
            ComparisonOp::Less => " < ",
            ComparisonOp::Greater => " > ",
            ComparisonOp::LessEqual => " <= ",
            ComparisonOp::GreaterEqual => " >= ",
            ComparisonOp::Like => " LIKE ",
            ComparisonOp::NotLike => " NOT LIKE ",
        });
    }

    fn write_conjunction(&self, _context: &mut Context, out: &mut String, value: &Conjunction) {
        out.push_str(match value {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        });
    }

    /// Render one condition. `parenthesized` wraps raw SQL that sits next to other predicates.
    fn write_predicate(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &Predicate,
        parenthesized: bool,
    ) {
        match value {
            Predicate::Compare { column, op, value } => {
                self.write_identifier(context, out, column);
                if value.is_null() && matches!(op, ComparisonOp::Equal | ComparisonOp::NotEqual) {
                    out.push_str(if *op == ComparisonOp::Equal {
                        " IS NULL"
                    } else {
                        " IS NOT NULL"
                    });
                } else {
                    self.write_comparison_op(context, out, op);
                    self.write_parameter(context, out, value);
                }
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    out.push_str(if *negated { "1 = 1" } else { "1 = 0" });
                    return;
                }
                self.write_identifier(context, out, column);
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                separated_by(
                    out,
                    values,
                    |out, v| self.write_parameter(context, out, v),
                    ", ",
                );
                out.push(')');
            }
            Predicate::Between {
                column,
                low,
                high,
                negated,
            } => {
                self.write_identifier(context, out, column);
                out.push_str(if *negated {
                    " NOT BETWEEN "
                } else {
                    " BETWEEN "
                });
                self.write_parameter(context, out, low);
                out.push_str(" AND ");
                self.write_parameter(context, out, high);
            }
            Predicate::Null { column, negated } => {
                self.write_identifier(context, out, column);
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Predicate::Raw(sql) => {
                possibly_parenthesized!(out, parenthesized, out.push_str(sql));
            }
            Predicate::Group(filter) => {
                possibly_parenthesized!(
                    out,
                    filter.len() > 1,
                    self.write_filter(context, out, filter)
                );
            }
        }
    }

    /// Render predicates joined by their conjunctions, left to right.
    ///
    /// Groups without conditions are skipped together with their conjunction.
    fn write_filter(&self, context: &mut Context, out: &mut String, value: &Filter) {
        let parenthesized = value.len() > 1;
        for (i, (conjunction, predicate)) in value.conditions().enumerate() {
            if i > 0 {
                self.write_conjunction(context, out, conjunction);
            }
            self.write_predicate(context, out, predicate, parenthesized);
        }
    }

    fn write_join_type(&self, _context: &mut Context, out: &mut String, join_type: &JoinType) {
        out.push_str(match join_type {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Cross => "CROSS JOIN",
        });
    }

    /// Render a JOIN clause.
    fn write_join(&self, context: &mut Context, out: &mut String, join: &Join) {
        let mut context = context.switch_fragment(Fragment::SqlJoin);
        self.write_join_type(context.current, out, &join.join);
        out.push(' ');
        self.write_table_ref(context.current, out, &join.table);
        match &join.on {
            Some(JoinCondition::Columns(lhs, rhs)) => {
                out.push_str(" ON ");
                self.write_identifier(context.current, out, lhs);
                out.push_str(" = ");
                self.write_identifier(context.current, out, rhs);
            }
            Some(JoinCondition::Raw(sql)) => {
                out.push_str(" ON ");
                out.push_str(sql);
            }
            None => {}
        }
    }

    fn write_ordered(&self, context: &mut Context, out: &mut String, value: &Ordered) {
        self.write_identifier(context, out, &value.column);
        out.push_str(match value.order {
            Order::ASC => " ASC",
            Order::DESC => " DESC",
        });
    }

    /// Render `ORDER BY`, nothing when there is no ordering.
    fn write_order_by(&self, context: &mut Context, out: &mut String, value: &[Ordered]) {
        if value.is_empty() {
            return;
        }
        out.push_str("\nORDER BY ");
        let mut context = context.switch_fragment(Fragment::SqlSelectOrderBy);
        separated_by(
            out,
            value,
            |out, v| self.write_ordered(context.current, out, v),
            ", ",
        );
    }

    /// Render `LIMIT` and `OFFSET`.
    fn write_limit_offset(
        &self,
        _context: &mut Context,
        out: &mut String,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        if let Some(limit) = limit {
            let _ = write!(out, "\nLIMIT {}", limit);
        }
        if let Some(offset) = offset {
            let _ = write!(out, "\nOFFSET {}", offset);
        }
    }

    /// Emit SELECT.
    fn write_select(&self, context: &mut Context, out: &mut String, value: &SelectParts) {
        out.reserve(128 + value.columns.len() * 32);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT ");
        if value.distinct {
            out.push_str("DISTINCT ");
        }
        self.write_columns(
            &mut context.switch_fragment(Fragment::SqlSelect).current,
            out,
            &value.columns,
        );
        if let Some(from) = &value.from {
            out.push_str("\nFROM ");
            self.write_table_ref(
                &mut context.switch_fragment(Fragment::SqlSelectFrom).current,
                out,
                from,
            );
        }
        for join in &value.joins {
            out.push('\n');
            self.write_join(context, out, join);
        }
        if !value.filter.is_empty() {
            out.push_str("\nWHERE ");
            self.write_filter(
                &mut context.switch_fragment(Fragment::SqlSelectWhere).current,
                out,
                &value.filter,
            );
        }
        if !value.group_by.is_empty() {
            out.push_str("\nGROUP BY ");
            let mut context = context.switch_fragment(Fragment::SqlSelectGroupBy);
            separated_by(
                out,
                &value.group_by,
                |out, v| self.write_identifier(context.current, out, v),
                ", ",
            );
        }
        if !value.having.is_empty() {
            out.push_str("\nHAVING ");
            self.write_filter(
                &mut context.switch_fragment(Fragment::SqlSelectHaving).current,
                out,
                &value.having,
            );
        }
        self.write_order_by(context, out, &value.order_by);
        self.write_limit_offset(context, out, value.limit, value.offset);
        out.push(';');
    }

    /// Emit INSERT with one or more rows.
    fn write_insert(&self, context: &mut Context, out: &mut String, value: &InsertParts) {
        out.reserve(128 + value.columns.len() * (16 + value.rows.len() * 8));
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("INSERT INTO ");
        let mut context = context.switch_fragment(Fragment::SqlInsertInto);
        self.write_identifier(context.current, out, &value.table);
        if value.rows.is_empty() {
            self.write_insert_default_values(context.current, out);
            out.push(';');
            return;
        }
        if !value.columns.is_empty() {
            out.push_str(" (");
            separated_by(
                out,
                &value.columns,
                |out, v| self.write_identifier(context.current, out, v),
                ", ",
            );
            out.push(')');
        }
        out.push_str(" VALUES\n");
        let mut context = context.current.switch_fragment(Fragment::SqlInsertIntoValues);
        separated_by(
            out,
            &value.rows,
            |out, row| {
                out.push('(');
                separated_by(
                    out,
                    row,
                    |out, v| self.write_parameter(context.current, out, v),
                    ", ",
                );
                out.push(')');
            },
            ",\n",
        );
        out.push(';');
    }

    /// Tail of an INSERT without rows.
    fn write_insert_default_values(&self, _context: &mut Context, out: &mut String) {
        out.push_str(" DEFAULT VALUES");
    }

    /// Emit UPDATE.
    fn write_update(&self, context: &mut Context, out: &mut String, value: &UpdateParts) {
        out.reserve(128 + value.assignments.len() * 32);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("UPDATE ");
        self.write_identifier(
            &mut context.switch_fragment(Fragment::SqlUpdate).current,
            out,
            &value.table,
        );
        out.push_str(" SET\n");
        {
            let mut context = context.switch_fragment(Fragment::SqlUpdateSet);
            separated_by(
                out,
                &value.assignments,
                |out, (column, assignment)| {
                    self.write_identifier(context.current, out, column);
                    out.push_str(" = ");
                    match assignment {
                        Assignment::Value(v) => self.write_parameter(context.current, out, v),
                        Assignment::Raw(sql) => out.push_str(sql),
                    }
                },
                ",\n",
            );
        }
        if !value.filter.is_empty() {
            out.push_str("\nWHERE ");
            self.write_filter(
                &mut context.switch_fragment(Fragment::SqlUpdateWhere).current,
                out,
                &value.filter,
            );
        }
        self.write_update_order_limit(context, out, &value.order_by, value.limit);
        out.push(';');
    }

    /// `ORDER BY` and `LIMIT` of an UPDATE. ANSI SQL has neither, they are
    /// dropped with a warning unless the dialect overrides this.
    fn write_update_order_limit(
        &self,
        _context: &mut Context,
        _out: &mut String,
        order_by: &[Ordered],
        limit: Option<u64>,
    ) {
        if !order_by.is_empty() || limit.is_some() {
            log::warn!("This grammar does not support ORDER BY or LIMIT on UPDATE, they are ignored");
        }
    }

    /// Text bound for a DATE value.
    fn write_bind_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    /// Text bound for a TIME value, fractional seconds only when not zero.
    fn write_bind_time(&self, out: &mut String, value: &Time) {
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second()
        );
        let mut subsecond = value.nanosecond();
        if subsecond != 0 {
            let mut width = 9;
            while subsecond % 10 == 0 {
                subsecond /= 10;
                width -= 1;
            }
            let _ = write!(out, ".{:0width$}", subsecond);
        }
    }

    /// Text bound for a TIMESTAMP value.
    fn write_bind_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        self.write_bind_date(out, &value.date());
        out.push(' ');
        self.write_bind_time(out, &value.time());
    }

    /// Text bound for a TIMESTAMPTZ value, normalized to UTC.
    fn write_bind_timestamptz(&self, out: &mut String, value: &OffsetDateTime) {
        let date_time = value.to_offset(UtcOffset::UTC);
        self.write_bind_timestamp(
            out,
            &PrimitiveDateTime::new(date_time.date(), date_time.time()),
        );
    }

    /// Emit BEGIN statement.
    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    /// Emit COMMIT statement.
    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    /// Emit ROLLBACK statement.
    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }
}
