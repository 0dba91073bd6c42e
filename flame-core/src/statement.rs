use crate::{
    BindError, CompiledQuery, Error, Grammar, ParamType, Parameters, Prepared, QueryResult,
    Result, Value, truncate_long,
};
use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::Arc,
};

/// Driver prepared statement together with the binding plan of its SQL.
///
/// The plan is captured when the statement is prepared and never changes:
/// preparing other statements on the same connection does not affect it.
pub struct Statement<P: Prepared> {
    prepared: P,
    compiled: CompiledQuery,
    grammar: Arc<dyn Grammar>,
}

impl<P: Prepared> Statement<P> {
    pub fn new(prepared: P, compiled: CompiledQuery, grammar: Arc<dyn Grammar>) -> Self {
        Self {
            prepared,
            compiled,
            grammar,
        }
    }

    /// Positional SQL handed to the driver.
    pub fn sql(&self) -> &str {
        &self.compiled.sql
    }

    /// Parameter name bound at each `?`, in order.
    pub fn placeholders(&self) -> &[String] {
        &self.compiled.placeholders
    }

    pub fn types(&self) -> &HashMap<String, ParamType> {
        &self.compiled.types
    }

    pub fn compiled(&self) -> &CompiledQuery {
        &self.compiled
    }

    pub fn prepared(&self) -> &P {
        &self.prepared
    }

    pub fn into_prepared(self) -> P {
        self.prepared
    }

    /// Values to bind at each position, already coerced to the type of their name.
    ///
    /// Fails with [`BindError`] on the first position that cannot be bound.
    pub fn resolve(&self, parameters: &Parameters) -> Result<Vec<(Value, ParamType)>> {
        self.compiled
            .placeholders
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let param_type = self.compiled.param_type(name).unwrap_or_default();
                let Some(value) = parameters.get(name) else {
                    return Err(Error::new(BindError::MissingParameter {
                        name: name.clone(),
                        position: i as u64 + 1,
                    }));
                };
                param_type
                    .coerce(value.clone(), self.grammar.as_dyn())
                    .map(|value| (value, param_type))
                    .map_err(|reason| {
                        Error::new(BindError::TypeCoercion {
                            name: name.clone(),
                            expected: param_type,
                            found: value.type_name().into(),
                            reason,
                        })
                    })
            })
            .collect()
    }

    /// Bind `parameters` by name and run the statement.
    ///
    /// Every value is resolved before the first one is bound: a missing or
    /// unconvertible parameter fails without touching the driver statement.
    /// Driver errors are returned unchanged. The statement can be executed
    /// again with other parameters.
    pub fn execute(&mut self, parameters: &Parameters) -> Result<QueryResult> {
        let values = self.resolve(parameters)?;
        self.prepared.clear_bindings()?;
        for (i, (value, param_type)) in values.into_iter().enumerate() {
            let index = i as u64 + 1;
            log::trace!(
                "Binding `{}` at position {} as {}: {}",
                self.compiled.placeholders[i],
                index,
                param_type,
                value
            );
            self.prepared.bind_index(value, param_type, index)?;
        }
        self.prepared.execute()
    }
}

impl<P: Prepared> Display for Statement<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate_long!(self.compiled.sql))
    }
}
