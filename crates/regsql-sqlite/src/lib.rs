//! SQLite execution adapter for regsql query text.
//!
//! Builders in `regsql-core` only produce text. This crate runs that text
//! on a sqlx SQLite pool and maps the rows:
//!
//! ```rust,no_run
//! use regsql_sqlite::{ExecutorConfig, SqliteExecutor};
//!
//! # async fn run() -> regsql_sqlite::Result<()> {
//! let executor = SqliteExecutor::connect(&ExecutorConfig::from_env()?).await?;
//! let names: Vec<(String,)> = executor
//!     .fetch_all("SELECT \"User\".\"Name\" FROM \"User\"")
//!     .await?;
//! # let _ = names;
//! # Ok(())
//! # }
//! ```
//!
//! ## Dialect notes
//!
//! SQLite rejects a qualified star inside `COUNT`, so the text produced
//! by `Projection::count` (`COUNT("User".*)`) fails with a syntax error
//! here. Count with `Projection::select_custom(false, &["COUNT(*)"])` and
//! [`SqliteExecutor::fetch_count`] instead.

pub mod config;
pub mod error;
pub mod executor;

pub use config::ExecutorConfig;
pub use error::{ExecError, Result};
pub use executor::SqliteExecutor;
