//! Fluent SQL text builder.
//!
//! A query is built in four stages, each a distinct type that only
//! exposes forward transitions:
//!
//! [`Projection`] → [`Source`] → [`Predicate`] → [`Ordering`] → `String`
//!
//! Every stage is generic over the table currently in scope. Joins and
//! [`Source::using`] pivot that table, so later calls without an alias
//! address the newly joined table.
//!
//! # Example
//!
//! ```rust
//! use regsql_core::builder::Projection;
//! use regsql_derive::Table;
//!
//! #[derive(Table)]
//! pub struct Service {
//!     #[column(primary_key)]
//!     pub id: i64,
//!     pub name: String,
//!     pub organization_id: i64,
//! }
//!
//! #[derive(Table)]
//! pub struct Organization {
//!     #[column(primary_key)]
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! let sql = Projection::select((Service::id(), Service::name()))
//!     .from(None)
//!     .inner_join(Service::organization_id(), Organization::id())
//!     .where_col(Organization::name(), "= 'Helsinki'")
//!     .order_by(Organization::name(), false)
//!     .limit(20, Some(40));
//!
//! assert_eq!(
//!     sql,
//!     "SELECT \"Service\".\"id\", \"Service\".\"name\" FROM \"Service\" \
//!      INNER JOIN \"Organization\" ON \"Service\".\"organization_id\" = \"Organization\".\"id\" \
//!      WHERE \"Organization\".\"name\" = 'Helsinki' \
//!      ORDER BY \"Organization\".\"name\" LIMIT 20 OFFSET 40"
//! );
//! ```
//!
//! Clause order is enforced by the types. A `WHERE` cannot be written
//! before `FROM`:
//!
//! ```compile_fail
//! use regsql_core::builder::Projection;
//! use regsql_derive::Table;
//!
//! #[derive(Table)]
//! pub struct Service {
//!     pub id: i64,
//! }
//!
//! let _ = Projection::select(Service::id()).where_col(Service::id(), "= 1");
//! ```
//!
//! and nothing can follow `ORDER BY` except more ordering or `LIMIT`:
//!
//! ```compile_fail
//! use regsql_core::builder::Projection;
//! use regsql_derive::Table;
//!
//! #[derive(Table)]
//! pub struct Service {
//!     pub id: i64,
//! }
//!
//! let _ = Projection::select(Service::id())
//!     .from(None)
//!     .order_by(Service::id(), false)
//!     .and(Service::id(), "= 1");
//! ```

mod literal;
mod ordering;
mod predicate;
mod projection;
mod source;
pub mod text;

pub use literal::{IntoLiteral, Literal};
pub use ordering::Ordering;
pub use predicate::{Connective, Predicate};
pub use projection::Projection;
pub use source::Source;
pub use text::{embrace, QueryText};
