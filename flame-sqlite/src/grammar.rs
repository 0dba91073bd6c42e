use flame_core::{Context, Grammar};
use std::fmt::Write;

/// SQLite dialect: ANSI quoting, an offset needs a `LIMIT` in front of it.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteGrammar {}

impl Grammar for SqliteGrammar {
    fn as_dyn(&self) -> &dyn Grammar {
        self
    }

    fn write_limit_offset(
        &self,
        _context: &mut Context,
        out: &mut String,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        match (limit, offset) {
            (Some(limit), offset) => {
                let _ = write!(out, "\nLIMIT {}", limit);
                if let Some(offset) = offset {
                    let _ = write!(out, " OFFSET {}", offset);
                }
            }
            (None, Some(offset)) => {
                let _ = write!(out, "\nLIMIT -1 OFFSET {}", offset);
            }
            (None, None) => {}
        }
    }
}
