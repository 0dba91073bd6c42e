use crate::{ParamType, QueryResult, Result, Value};
use std::fmt::Display;

/// A backend prepared statement with positional parameters.
///
/// # Binding Semantics
/// * `bind_index` sets the parameter at `index`, the first one being 1.
/// * `value` was already coerced for `param_type`: it is `Null` or the
///   representation listed by [`ParamType::coerce`].
/// * bindings survive `execute`, `clear_bindings` resets all of them to NULL.
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// prepared
///     .bind_index(Value::Int64(42), ParamType::Int, 1)?
///     .bind_index(Value::Varchar("hello".into()), ParamType::String, 2)?;
/// ```
pub trait Prepared: Display {
    /// Bind a value at a specific index.
    fn bind_index(&mut self, value: Value, param_type: ParamType, index: u64)
    -> Result<&mut Self>;
    /// Remove all the previously bound values.
    fn clear_bindings(&mut self) -> Result<&mut Self>;
    /// Run the statement with the current bindings.
    fn execute(&mut self) -> Result<QueryResult>;
}
