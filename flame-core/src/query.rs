use crate::{AsValue, Error, Result, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
    /// Decode the value of column `name`.
    pub fn get<T: AsValue>(&self, name: &str) -> Result<T> {
        let Some(value) = self.get_column(name) else {
            return Err(Error::msg(format!(
                "Column `{}` is not part of the row (columns: {})",
                name,
                self.labels.join(", ")
            )));
        };
        T::try_from_value(value.clone())
            .map_err(|e| e.context(format!("While decoding column `{}`", name)))
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Everything a driver reports back after executing a statement.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Rows produced, empty for statements that do not return any.
    pub rows: Vec<RowLabeled>,
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted / affected identifier when available.
    pub last_affected_id: Option<i64>,
}

impl QueryResult {
    pub fn rows(&self) -> &[RowLabeled] {
        &self.rows
    }
    pub fn first(&self) -> Option<&RowLabeled> {
        self.rows.first()
    }
    pub fn into_rows(self) -> Vec<RowLabeled> {
        self.rows
    }
}

impl IntoIterator for QueryResult {
    type Item = RowLabeled;
    type IntoIter = std::vec::IntoIter<RowLabeled>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
