//! Ordering stage: `ORDER BY` continuations and the trailing `LIMIT`.

use std::fmt;
use std::marker::PhantomData;

use super::text::{self, QueryText};
use crate::schema::{ColumnRef, Table};

/// Builds the `ORDER BY` list. Only more ordering columns or `LIMIT`
/// may follow.
pub struct Ordering<T: Table> {
    text: QueryText,
    _table: PhantomData<T>,
}

impl<T: Table> Clone for Ordering<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            _table: PhantomData,
        }
    }
}

const fn direction(descending: bool) -> &'static str {
    if descending {
        " DESC"
    } else {
        ""
    }
}

impl<T: Table> Ordering<T> {
    pub(crate) fn start(mut text: QueryText, column: &str, descending: bool) -> Self {
        text.append(" ORDER BY ");
        text.append(column);
        text.append(direction(descending));
        Self {
            text,
            _table: PhantomData,
        }
    }

    fn then(mut self, column: &str, descending: bool) -> Self {
        self.text.append(", ");
        self.text.append(column);
        self.text.append(direction(descending));
        self
    }

    /// Appends `, "T".key [DESC]`.
    #[must_use]
    pub fn then_by(self, key: impl ColumnRef<Table = T>, descending: bool) -> Self {
        let column = text::qualified(None, &key);
        self.then(&column, descending)
    }

    /// Appends `, alias.key [DESC]`.
    #[must_use]
    pub fn then_by_as(self, alias: &str, key: impl ColumnRef<Table = T>, descending: bool) -> Self {
        let column = text::qualified(Some(alias), &key);
        self.then(&column, descending)
    }

    /// Appends `, column [DESC]` with pre-formatted column text.
    #[must_use]
    pub fn then_by_custom(self, column: &str, descending: bool) -> Self {
        self.then(column, descending)
    }

    /// Appends `LIMIT n [OFFSET offset]` and renders the query.
    #[must_use]
    pub fn limit(mut self, n: u64, offset: Option<u64>) -> String {
        self.text.limit(n, offset);
        self.text.render()
    }

    /// Renders the query.
    #[must_use]
    pub fn build(&self) -> String {
        self.text.render()
    }
}

impl<T: Table> fmt::Display for Ordering<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}
