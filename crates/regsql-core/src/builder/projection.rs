//! Projection stage: everything between `SELECT` and `FROM`.

use std::fmt;
use std::marker::PhantomData;

use super::literal::IntoLiteral;
use super::source::Source;
use super::text::{self, QueryText};
use crate::schema::{ColumnRef, Columns, Table};

/// Builds the column list of a `SELECT`.
///
/// `T` is the table the next typed call refers to. It is fixed by the
/// constructor and changes only through [`then_select`](Self::then_select)
/// and [`then_select_as`](Self::then_select_as).
pub struct Projection<T: Table> {
    text: QueryText,
    has_columns: bool,
    _table: PhantomData<T>,
}

impl<T: Table> Clone for Projection<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            has_columns: self.has_columns,
            _table: PhantomData,
        }
    }
}

impl<T: Table> Projection<T> {
    fn start(distinct: bool) -> Self {
        let keyword = if distinct { "SELECT DISTINCT " } else { "SELECT " };
        Self {
            text: QueryText::seeded(keyword),
            has_columns: false,
            _table: PhantomData,
        }
    }

    /// The `SELECT 1` seed handed to `EXISTS` subqueries.
    pub(crate) fn select_one() -> Self {
        Self {
            text: QueryText::seeded("SELECT 1"),
            has_columns: true,
            _table: PhantomData,
        }
    }

    fn push_column(&mut self, column: &str) {
        if self.has_columns {
            self.text.append(", ");
        }
        self.text.append(column);
        self.has_columns = true;
    }

    fn push_columns<S: Columns>(&mut self, alias: Option<&str>, columns: &S) {
        let table = text::table_name_or_alias::<S::Table>(alias);
        for name in columns.names() {
            self.push_column(&format!("{table}.{}", text::quote_identifier(name)));
        }
    }

    fn pivot<U: Table>(self) -> Projection<U> {
        Projection {
            text: self.text,
            has_columns: self.has_columns,
            _table: PhantomData,
        }
    }

    /// Starts `SELECT table.col, ...` for one or more columns of `T`.
    #[must_use]
    pub fn select<S: Columns<Table = T>>(columns: S) -> Self {
        let mut projection = Self::start(false);
        projection.push_columns(None, &columns);
        projection
    }

    /// Starts `SELECT alias.col, ...`.
    #[must_use]
    pub fn select_as<S: Columns<Table = T>>(alias: &str, columns: S) -> Self {
        let mut projection = Self::start(false);
        projection.push_columns(Some(alias), &columns);
        projection
    }

    /// Starts `SELECT DISTINCT table.col, ...`.
    #[must_use]
    pub fn select_distinct<S: Columns<Table = T>>(columns: S) -> Self {
        let mut projection = Self::start(true);
        projection.push_columns(None, &columns);
        projection
    }

    /// Starts `SELECT DISTINCT alias.col, ...`.
    #[must_use]
    pub fn select_distinct_as<S: Columns<Table = T>>(alias: &str, columns: S) -> Self {
        let mut projection = Self::start(true);
        projection.push_columns(Some(alias), &columns);
        projection
    }

    /// Starts a projection from pre-formatted column text, appended verbatim.
    ///
    /// **Warning**: the text is not checked or escaped.
    #[must_use]
    pub fn select_custom(distinct: bool, columns: &[&str]) -> Self {
        let mut projection = Self::start(distinct);
        for column in columns {
            projection.push_column(column);
        }
        projection
    }

    /// Starts `SELECT COUNT(table.*)`.
    ///
    /// SQLite does not accept a qualified `*` inside `COUNT`; for that
    /// dialect use `select_custom(false, &["COUNT(*)"])` instead.
    #[must_use]
    pub fn count(alias: Option<&str>) -> Self {
        let mut projection = Self::start(false);
        let table = text::table_name_or_alias::<T>(alias);
        projection.push_column(&format!("COUNT({table}.*)"));
        projection
    }

    /// Appends pre-formatted column text verbatim.
    #[must_use]
    pub fn then_select_custom(mut self, columns: &[&str]) -> Self {
        for column in columns {
            self.push_column(column);
        }
        self
    }

    /// Appends columns of another table and pivots to it.
    ///
    /// The table must be joined later in the chain. This is not checked;
    /// a missing join only fails when the SQL is executed.
    #[must_use]
    pub fn then_select<S: Columns>(mut self, columns: S) -> Projection<S::Table> {
        self.push_columns(None, &columns);
        self.pivot()
    }

    /// Appends `alias.col, ...` for another table and pivots to it.
    #[must_use]
    pub fn then_select_as<S: Columns>(mut self, alias: &str, columns: S) -> Projection<S::Table> {
        self.push_columns(Some(alias), &columns);
        self.pivot()
    }

    /// Appends `CASE table.col WHEN k THEN v ... [ELSE d] END AS case_alias`.
    ///
    /// `WHEN` branches follow the iteration order of `options`; pass a
    /// `Vec` or another ordered collection when the order matters.
    #[must_use]
    pub fn case<K, I, W, V>(
        mut self,
        key: K,
        case_alias: &str,
        options: I,
        default: Option<V>,
    ) -> Self
    where
        K: ColumnRef<Table = T>,
        I: IntoIterator<Item = (W, V)>,
        W: IntoLiteral,
        V: IntoLiteral,
    {
        let mut case = format!("CASE {}", text::qualified(None, &key));
        for (when, then) in options {
            case.push_str(&format!(
                " WHEN {} THEN {}",
                when.into_literal(),
                then.into_literal()
            ));
        }
        if let Some(default) = default {
            case.push_str(&format!(" ELSE {}", default.into_literal()));
        }
        case.push_str(&format!(" END AS {case_alias}"));
        self.push_column(&case);
        self
    }

    /// Appends `FROM "T" [AS alias]` and opens the source stage.
    #[must_use]
    pub fn from(mut self, alias: Option<&str>) -> Source<T> {
        self.text.append(" FROM ");
        self.text.append(&text::table_name_or_alias::<T>(None));
        if let Some(alias) = alias {
            self.text.append(&format!(" AS {alias}"));
        }
        Source::from_text(self.text)
    }

    /// Appends `FROM (inner) AS alias`, using a rendered query as source.
    #[must_use]
    pub fn from_custom(mut self, inner: &impl fmt::Display, alias: &str) -> Source<T> {
        self.text.append(" FROM ");
        self.text.append_embraced(inner);
        self.text.append(&format!(" AS {alias}"));
        Source::from_text(self.text)
    }

    /// Renders the projection as it stands.
    #[must_use]
    pub fn build(&self) -> String {
        self.text.render()
    }
}

impl<T: Table> fmt::Display for Projection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}
