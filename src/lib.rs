//! Named, type-tagged SQL placeholders and a dialect-aware query builder on
//! top of any database driver.
//!
//! ```rust,ignore
//! use flame::{Connection, WhereClause, QueryBuilder, params};
//! use flame_sqlite::SqliteDriver;
//!
//! let mut connection = Connection::<SqliteDriver>::connect("sqlite://:memory:")?;
//! connection.query("CREATE TABLE user (name TEXT, age INTEGER)", &params! {})?;
//! connection
//!     .insert("user", ["name", "age"])
//!     .values([Value::from("Ada"), 36.into()])
//!     .execute(&mut connection)?;
//! let adults = connection.query(
//!     "SELECT name FROM user WHERE age >= i:age",
//!     &params! { "age" => 18 },
//! )?;
//! ```
pub use flame_core::*;
