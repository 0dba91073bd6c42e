mod as_value;
mod builder;
mod compiler;
mod connection;
mod driver;
mod error;
mod grammar;
mod param_type;
mod parameters;
mod prepared;
mod query;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use as_value::*;
pub use builder::*;
pub use compiler::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use grammar::*;
pub use param_type::*;
pub use parameters::*;
pub use prepared::*;
pub use query::*;
pub use statement::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
