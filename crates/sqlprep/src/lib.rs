//! # sqlprep
//!
//! Expands SQL templates with typed placeholders into driver-specific SQL.
//!
//! ## Features
//!
//! - **Typed placeholders**: `?` for values, `?name` for identifiers and
//!   `?and`/`?or`/`?set`/`?values`/`?order`/`?list` for arrays
//! - **Context-aware arrays**: a bare `?` after `WHERE`, `SET`, `INSERT` or
//!   `ORDER BY` formats an array the way that clause needs
//! - **Inline or bound**: scalars are inlined as literals, or replaced by `?`
//!   and returned for driver binding once a `SELECT`/`INSERT`/... is seen
//! - **Nested fragments**: [`SqlLiteral`] values expand their own placeholders
//! - **Pluggable dialects**: quoting and temporal formats come from a [`Driver`]
//!
//! ## Example
//!
//! ```ignore
//! use sqlprep::{MySqlDriver, Preprocessor, array, params};
//!
//! let pre = Preprocessor::new(MySqlDriver);
//!
//! let (sql, bound) = pre.process(
//!     &params![
//!         "UPDATE users SET", array! { "name" => "alice", "logins+=" => 1 },
//!         "WHERE", array! { "id" => 7, "deleted_at" => None::<i32> },
//!     ],
//!     false,
//! )?;
//! assert_eq!(
//!     sql,
//!     "UPDATE users SET `name` = ?, `logins` = `logins` + ? WHERE (`id` = ?) AND (`deleted_at` IS NULL)"
//! );
//! assert_eq!(bound, params!["alice", 1, 7]);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod ident;
mod lexer;
mod macros;
pub mod preprocessor;
pub mod value;

pub use config::{MultiInsertSyntax, PreprocessorConfig};
pub use driver::{Driver, MySqlDriver, PostgresDriver, SqliteDriver};
pub use error::{PrepError, PrepResult};
pub use preprocessor::{Mode, Preprocessor};
pub use value::{Array, EnumValue, Key, SqlLiteral, TableRow, Value};

#[cfg(feature = "derive")]
pub use sqlprep_derive::TableRow;
