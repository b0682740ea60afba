//! Query-text core shared by every builder stage.
//!
//! [`QueryText`] owns the accumulated SQL. The free functions in this
//! module are the only place table and column names are turned into
//! text; stages never format identifiers themselves.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use super::literal::{IntoLiteral, Literal};
use crate::schema::{ColumnRef, Table};

/// Wraps a fully rendered expression in parentheses.
#[must_use]
pub fn embrace(inner: &str) -> String {
    format!("({inner})")
}

/// Quotes an identifier with double quotes, doubling embedded quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns `alias` verbatim when given, else the quoted name of `T`.
#[must_use]
pub fn table_name_or_alias<T: Table>(alias: Option<&str>) -> Cow<'_, str> {
    alias.map_or_else(|| Cow::Owned(quote_identifier(T::NAME)), Cow::Borrowed)
}

/// Returns the quoted name of the referenced column.
#[must_use]
pub fn column_name<C: ColumnRef>(key: &C) -> String {
    quote_identifier(key.name())
}

/// Returns `table.column` for `key`, qualified by `alias` when given.
#[must_use]
pub fn qualified<C: ColumnRef>(alias: Option<&str>, key: &C) -> String {
    format!(
        "{}.{}",
        table_name_or_alias::<C::Table>(alias),
        column_name(key)
    )
}

/// Renders `table.column = value`, or `table.column IS NULL` for a null
/// value.
#[must_use]
pub fn equal<C: ColumnRef>(alias: Option<&str>, key: &C, value: impl IntoLiteral) -> String {
    match value.into_literal() {
        Literal::Null => format!("{} IS NULL", qualified(alias, key)),
        value => format!("{} = {value}", qualified(alias, key)),
    }
}

/// Renders `table.column != value`, or `table.column IS NOT NULL` for a
/// null value.
#[must_use]
pub fn not_equal<C: ColumnRef>(alias: Option<&str>, key: &C, value: impl IntoLiteral) -> String {
    match value.into_literal() {
        Literal::Null => format!("{} IS NOT NULL", qualified(alias, key)),
        value => format!("{} != {value}", qualified(alias, key)),
    }
}

/// The accumulated text of a query under construction.
///
/// The body only grows. Common table expressions are kept apart and
/// rendered ahead of the body, since `WITH` must precede the statement
/// it decorates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryText {
    ctes: Vec<String>,
    body: String,
}

impl QueryText {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctes: Vec::new(),
            body: String::new(),
        }
    }

    /// Creates a buffer starting with `text`.
    #[must_use]
    pub fn seeded(text: &str) -> Self {
        Self {
            ctes: Vec::new(),
            body: String::from(text),
        }
    }

    /// Appends literal text. No grammar checks are made.
    pub fn append(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    /// Appends the rendered text of another builder.
    pub fn append_rendered(&mut self, other: &impl fmt::Display) {
        self.body.push_str(&other.to_string());
    }

    /// Appends the rendered text of another builder in parentheses.
    pub fn append_embraced(&mut self, inner: &impl fmt::Display) {
        self.body.push_str(&embrace(&inner.to_string()));
    }

    /// Registers `alias AS (query)` to be rendered in the `WITH` prefix.
    ///
    /// Definitions render in registration order.
    pub fn prepend_cte(&mut self, alias: &str, query: &impl fmt::Display) {
        self.ctes
            .push(format!("{alias} AS {}", embrace(&query.to_string())));
    }

    /// Appends `LIMIT n` and, when given, `OFFSET offset`.
    pub fn limit(&mut self, n: u64, offset: Option<u64>) {
        self.body.push_str(&format!(" LIMIT {n}"));
        if let Some(offset) = offset {
            self.body.push_str(&format!(" OFFSET {offset}"));
        }
    }

    /// Returns the body without the `WITH` prefix.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.ctes.is_empty()
    }

    /// Renders the final statement text.
    #[must_use]
    pub fn render(&self) -> String {
        let sql = self.to_string();
        trace!(sql = %sql, "rendered query text");
        sql
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ctes.is_empty() {
            write!(f, "WITH {} ", self.ctes.join(", "))?;
        }
        f.write_str(&self.body)
    }
}
