//! # regsql-core
//!
//! A fluent SQL text builder for ad-hoc read queries.
//!
//! This crate provides:
//! - Schema traits implemented by `#[derive(Table)]`, so table and column
//!   names come from types rather than strings
//! - A four-stage builder (projection, source, predicate, ordering) using
//!   the typestate pattern, so clauses can only be written in SQL order
//! - Type pivoting at joins: the table a call refers to follows the chain
//!
//! ## Example
//!
//! ```rust
//! use regsql_core::builder::Projection;
//! use regsql_derive::Table;
//!
//! #[derive(Table)]
//! pub struct User {
//!     #[column(primary_key, name = "Id")]
//!     pub id: i64,
//!     #[column(name = "Name")]
//!     pub name: String,
//! }
//!
//! #[derive(Table)]
//! pub struct Order {
//!     #[column(primary_key, name = "Id")]
//!     pub id: i64,
//!     #[column(name = "UserId")]
//!     pub user_id: i64,
//! }
//!
//! let sql = Projection::select(User::name())
//!     .from(None)
//!     .where_()
//!     .exists::<OrderTable, _>(|q| {
//!         q.from(None)
//!             .where_compare(None, Order::user_id(), "=", None, User::id())
//!     })
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT \"User\".\"Name\" FROM \"User\" WHERE EXISTS \
//!      (SELECT 1 FROM \"Order\" WHERE \"Order\".\"UserId\" = \"User\".\"Id\")"
//! );
//! ```
//!
//! ## Literal text
//!
//! Queries are plain text. Raw condition strings such as `"= 5"` are
//! written verbatim, and typed values (`and_eq`, `case`, `like`) are
//! inlined with quotes doubled. Nothing is bound as a parameter, so do
//! not pass unsanitized external input as raw conditions.

pub mod builder;
pub mod schema;

pub use builder::{Ordering, Predicate, Projection, Source};
pub use schema::{Column, ColumnRef, Columns, Converted, Table};
