use crate::{Context, Grammar, Ordered};
use std::fmt::Write;

/// Grammar of MySQL and MariaDB: backtick identifiers and `LIMIT offset, count`.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySqlGrammar;

impl MySqlGrammar {
    pub fn new() -> Self {
        Self {}
    }
}

impl Grammar for MySqlGrammar {
    fn as_dyn(&self) -> &dyn Grammar {
        self
    }

    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(context, out, value, '`', "``");
        out.push('`');
    }

    fn write_limit_offset(
        &self,
        _context: &mut Context,
        out: &mut String,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        match (limit, offset) {
            (Some(limit), None) => {
                let _ = write!(out, "\nLIMIT {}", limit);
            }
            (limit, Some(offset)) => {
                let _ = write!(out, "\nLIMIT {}, {}", offset, limit.unwrap_or(u64::MAX));
            }
            (None, None) => {}
        }
    }

    fn write_update_order_limit(
        &self,
        context: &mut Context,
        out: &mut String,
        order_by: &[Ordered],
        limit: Option<u64>,
    ) {
        self.write_order_by(context, out, order_by);
        if let Some(limit) = limit {
            let _ = write!(out, "\nLIMIT {}", limit);
        }
    }

    fn write_insert_default_values(&self, _context: &mut Context, out: &mut String) {
        out.push_str(" () VALUES ()");
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("START TRANSACTION;");
    }
}
