use crate::{
    CBox, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use flame_core::{
    Error, ParamType, Prepared, QueryResult, Result, RowLabeled, RowNames, Value, truncate_long,
};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, c_char, c_int, c_void},
    fmt::{self, Display},
};

/// Prepared SQLite statement.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self { statement }
    }

    /// Positional SQL this statement was prepared from.
    pub fn sql(&self) -> String {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return String::new();
            }
            CStr::from_ptr(sql).to_string_lossy().into_owned()
        }
    }

    fn last_error(&self) -> Error {
        unsafe {
            let db = sqlite3_db_handle(*self.statement);
            Error::msg(error_message_from_ptr(&sqlite3_errmsg(db)).to_string())
        }
    }

    unsafe fn bind_text(&self, index: c_int, value: &str) -> c_int {
        unsafe {
            sqlite3_bind_text(
                *self.statement,
                index,
                value.as_ptr() as *const c_char,
                value.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        }
    }

    fn step_all(&mut self) -> Result<QueryResult> {
        unsafe {
            let statement = *self.statement;
            let count = sqlite3_column_count(statement);
            let labels = (0..count)
                .map(|i| extract_name(statement, i))
                .collect::<Result<RowNames>>()?;
            let mut rows = Vec::new();
            loop {
                match sqlite3_step(statement) {
                    SQLITE_BUSY => {
                        continue;
                    }
                    SQLITE_DONE => {
                        break;
                    }
                    SQLITE_ROW => {
                        rows.push(RowLabeled::new(
                            labels.clone(),
                            (0..count)
                                .map(|i| extract_value(statement, i))
                                .collect::<Result<_>>()?,
                        ));
                    }
                    _ => {
                        return Err(self.last_error());
                    }
                }
            }
            let mut result = QueryResult {
                rows,
                ..Default::default()
            };
            if sqlite3_stmt_readonly(statement) == 0 {
                let db = sqlite3_db_handle(statement);
                result.rows_affected = sqlite3_changes64(db) as u64;
                result.last_affected_id = Some(sqlite3_last_insert_rowid(db));
            }
            Ok(result)
        }
    }
}

impl Prepared for SqlitePrepared {
    fn bind_index(
        &mut self,
        value: Value,
        _param_type: ParamType,
        index: u64,
    ) -> Result<&mut Self> {
        let index = index as c_int;
        unsafe {
            let statement = *self.statement;
            let rc = match value {
                Value::Null => sqlite3_bind_null(statement, index),
                Value::Boolean(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int8(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int16(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int32(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int64(v) => sqlite3_bind_int64(statement, index, v),
                Value::UInt8(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::UInt16(v) => sqlite3_bind_int(statement, index, v as c_int),
                Value::UInt32(v) => sqlite3_bind_int64(statement, index, v as sqlite3_int64),
                Value::UInt64(v) => {
                    let Ok(v) = sqlite3_int64::try_from(v) else {
                        let error = Error::msg(format!(
                            "Cannot bind u64 value `{}` into sqlite integer because it's out of bounds",
                            v
                        ));
                        log::error!("{:#}", error);
                        return Err(error);
                    };
                    sqlite3_bind_int64(statement, index, v)
                }
                Value::Float32(v) => sqlite3_bind_double(statement, index, v as f64),
                Value::Float64(v) => sqlite3_bind_double(statement, index, v),
                Value::Varchar(ref v) => self.bind_text(index, v),
                Value::Blob(ref v) => sqlite3_bind_blob(
                    statement,
                    index,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Value::Decimal(v) => self.bind_text(index, &v.to_string()),
                Value::Date(v) => self.bind_text(index, &v.to_string()),
                Value::Time(v) => self.bind_text(index, &v.to_string()),
                Value::Timestamp(v) => self.bind_text(index, &v.to_string()),
                Value::TimestampWithTimezone(v) => self.bind_text(index, &v.to_string()),
                Value::Uuid(v) => self.bind_text(index, &v.to_string()),
            };
            if rc != SQLITE_OK {
                let error = self.last_error().context(format!(
                    "Cannot bind parameter {} to query:\n{}",
                    index,
                    truncate_long!(self.sql())
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(self)
    }

    fn clear_bindings(&mut self) -> Result<&mut Self> {
        unsafe {
            sqlite3_reset(*self.statement);
            if sqlite3_clear_bindings(*self.statement) != SQLITE_OK {
                let error = self.last_error().context("Could not clear the bindings");
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(self)
    }

    fn execute(&mut self) -> Result<QueryResult> {
        let result = self.step_all();
        unsafe {
            sqlite3_reset(*self.statement);
        }
        result.map_err(|e| {
            let error = e.context(format!(
                "While executing the query:\n{}",
                truncate_long!(self.sql())
            ));
            log::error!("{:#}", error);
            error
        })
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate_long!(self.sql()))
    }
}
