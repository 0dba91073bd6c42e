use crate::{Context, Grammar, InsertParts, Parameters, QueryBuilder, Value};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// INSERT statement builder, one or more rows.
///
/// Rows are given either whole with `values` (in the order of `columns`) or
/// one field at a time with `set`, which fills a single row.
#[derive(Clone)]
pub struct InsertQuery {
    grammar: Arc<dyn Grammar>,
    parts: InsertParts,
    bound: Parameters,
}

impl InsertQuery {
    pub fn new<S: Into<String>>(
        grammar: Arc<dyn Grammar>,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            grammar,
            parts: InsertParts {
                table: table.into(),
                columns: columns.into_iter().map(Into::into).collect(),
                rows: Vec::new(),
            },
            bound: Parameters::new(),
        }
    }

    pub fn parts(&self) -> &InsertParts {
        &self.parts
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.parts
            .columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append a row. When columns are listed, missing trailing fields are
    /// inserted as NULL and extra fields are ignored.
    pub fn values<V: Into<Value>>(mut self, row: impl IntoIterator<Item = V>) -> Self {
        let mut row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if !self.parts.columns.is_empty() {
            row.resize(self.parts.columns.len(), Value::Null);
        }
        self.parts.rows.push(row);
        self
    }

    /// Set `column` in the first row, adding the column when it is not listed yet.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let index = match self.parts.columns.iter().position(|c| *c == column) {
            Some(index) => index,
            None => {
                self.parts.columns.push(column);
                for row in &mut self.parts.rows {
                    row.push(Value::Null);
                }
                self.parts.columns.len() - 1
            }
        };
        if self.parts.rows.is_empty() {
            self.parts
                .rows
                .push(vec![Value::Null; self.parts.columns.len()]);
        }
        self.parts.rows[0][index] = value.into();
        self
    }

    /// Value of a placeholder written in a raw fragment.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bound.insert(name, value);
        self
    }
}

impl QueryBuilder for InsertQuery {
    fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_dyn()
    }
    fn bound(&self) -> &Parameters {
        &self.bound
    }
    fn write_query(&self, context: &mut Context, out: &mut String) {
        self.grammar.write_insert(context, out, &self.parts);
    }
}

impl Display for InsertQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().0)
    }
}
