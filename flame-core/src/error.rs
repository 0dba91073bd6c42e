use crate::ParamType;
use thiserror::Error;

/// Failure detected while matching parameters to the positional slots of a
/// [`Statement`](crate::Statement).
///
/// Raised before anything is bound to the driver statement, it travels inside
/// [`Error`](crate::Error) and can be recovered with `downcast_ref::<BindError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Missing value for parameter `{name}` (position {position})")]
    MissingParameter { name: String, position: u64 },
    #[error("Cannot bind {found} to parameter `{name}` of type {expected}: {reason}")]
    TypeCoercion {
        name: String,
        expected: ParamType,
        found: String,
        reason: String,
    },
}

impl BindError {
    /// Name of the parameter that could not be bound.
    pub fn name(&self) -> &str {
        match self {
            BindError::MissingParameter { name, .. } | BindError::TypeCoercion { name, .. } => name,
        }
    }
}
