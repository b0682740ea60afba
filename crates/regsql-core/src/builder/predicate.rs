//! Predicate stage: the boolean expression after `WHERE`.

use std::fmt;
use std::marker::PhantomData;

use super::literal::{IntoLiteral, Literal};
use super::ordering::Ordering;
use super::projection::Projection;
use super::text::{self, QueryText};
use crate::schema::{ColumnRef, Table};

/// Keyword joining a condition to the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connective {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Builds a `WHERE` expression as flat text.
///
/// Conditions are joined left to right with no implicit grouping; use
/// [`and_group`](Self::and_group) and [`or_group`](Self::or_group) for
/// parentheses.
pub struct Predicate<T: Table> {
    text: QueryText,
    has_condition: bool,
    pending_where: bool,
    _table: PhantomData<T>,
}

impl<T: Table> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            has_condition: self.has_condition,
            pending_where: self.pending_where,
            _table: PhantomData,
        }
    }
}

impl<T: Table> Predicate<T> {
    /// `pending_where` defers the ` WHERE` keyword to the first condition,
    /// so a predicate that never receives one renders without it.
    pub(crate) const fn from_text(text: QueryText, pending_where: bool) -> Self {
        Self {
            text,
            has_condition: false,
            pending_where,
            _table: PhantomData,
        }
    }

    /// An empty predicate for a parenthesized group.
    fn group() -> Self {
        Self::from_text(QueryText::new(), false)
    }

    /// Appends one condition fragment.
    ///
    /// The connective is written only when a condition precedes this one
    /// in the same predicate or group.
    #[must_use]
    pub fn add_condition(mut self, connective: Option<Connective>, fragment: &str) -> Self {
        if std::mem::take(&mut self.pending_where) {
            self.text.append(" WHERE");
        }
        if !self.text.body().is_empty() {
            self.text.append(" ");
        }
        if let Some(connective) = connective.filter(|_| self.has_condition) {
            self.text.append(connective.as_sql());
            self.text.append(" ");
        }
        self.text.append(fragment);
        self.has_condition = true;
        self
    }

    fn column_condition(
        self,
        connective: Connective,
        alias: Option<&str>,
        key: &impl ColumnRef<Table = T>,
        condition: &str,
    ) -> Self {
        let fragment = format!("{} {condition}", text::qualified(alias, key));
        self.add_condition(Some(connective), &fragment)
    }

    fn compare<U: Table>(
        self,
        connective: Connective,
        first_alias: Option<&str>,
        first_key: &impl ColumnRef<Table = T>,
        condition: &str,
        second_alias: Option<&str>,
        second_key: &impl ColumnRef<Table = U>,
    ) -> Self {
        let fragment = format!(
            "{} {condition} {}",
            text::qualified(first_alias, first_key),
            text::qualified(second_alias, second_key)
        );
        self.add_condition(Some(connective), &fragment)
    }

    fn grouped(self, connective: Connective, inner: impl FnOnce(Self) -> Self) -> Self {
        let group = inner(Self::group());
        if !group.has_condition {
            return self;
        }
        self.add_condition(Some(connective), &text::embrace(&group.text.to_string()))
    }

    fn exists_with<U: Table, R: fmt::Display>(
        self,
        connective: Connective,
        query: impl FnOnce(Projection<U>) -> R,
    ) -> Self {
        let rendered = query(Projection::select_one()).to_string();
        self.add_condition(
            Some(connective),
            &format!("EXISTS {}", text::embrace(&rendered)),
        )
    }

    fn like_with(
        self,
        connective: Connective,
        alias: Option<&str>,
        key: &impl ColumnRef<Table = T>,
        pattern: &str,
    ) -> Self {
        let fragment = format!(
            "LOWER({}) LIKE {}",
            text::qualified(alias, key),
            Literal::Text(pattern.to_lowercase())
        );
        self.add_condition(Some(connective), &fragment)
    }

    /// Appends `AND "T".key condition`.
    #[must_use]
    pub fn and(self, key: impl ColumnRef<Table = T>, condition: &str) -> Self {
        self.column_condition(Connective::And, None, &key, condition)
    }

    /// Appends `OR "T".key condition`.
    #[must_use]
    pub fn or(self, key: impl ColumnRef<Table = T>, condition: &str) -> Self {
        self.column_condition(Connective::Or, None, &key, condition)
    }

    /// Appends `AND alias.key condition`.
    #[must_use]
    pub fn and_as(self, alias: &str, key: impl ColumnRef<Table = T>, condition: &str) -> Self {
        self.column_condition(Connective::And, Some(alias), &key, condition)
    }

    /// Appends `OR alias.key condition`.
    #[must_use]
    pub fn or_as(self, alias: &str, key: impl ColumnRef<Table = T>, condition: &str) -> Self {
        self.column_condition(Connective::Or, Some(alias), &key, condition)
    }

    /// Appends `AND first condition second` across two tables.
    #[must_use]
    pub fn and_compare<U: Table>(
        self,
        first_alias: Option<&str>,
        first_key: impl ColumnRef<Table = T>,
        condition: &str,
        second_alias: Option<&str>,
        second_key: impl ColumnRef<Table = U>,
    ) -> Self {
        self.compare(
            Connective::And,
            first_alias,
            &first_key,
            condition,
            second_alias,
            &second_key,
        )
    }

    /// Appends `OR first condition second` across two tables.
    #[must_use]
    pub fn or_compare<U: Table>(
        self,
        first_alias: Option<&str>,
        first_key: impl ColumnRef<Table = T>,
        condition: &str,
        second_alias: Option<&str>,
        second_key: impl ColumnRef<Table = U>,
    ) -> Self {
        self.compare(
            Connective::Or,
            first_alias,
            &first_key,
            condition,
            second_alias,
            &second_key,
        )
    }

    /// Appends `AND "T".key = value`.
    #[must_use]
    pub fn and_eq(self, key: impl ColumnRef<Table = T>, value: impl IntoLiteral) -> Self {
        let fragment = text::equal(None, &key, value);
        self.add_condition(Some(Connective::And), &fragment)
    }

    /// Appends `AND "T".key != value`.
    #[must_use]
    pub fn and_not_eq(self, key: impl ColumnRef<Table = T>, value: impl IntoLiteral) -> Self {
        let fragment = text::not_equal(None, &key, value);
        self.add_condition(Some(Connective::And), &fragment)
    }

    /// Appends `OR "T".key = value`.
    #[must_use]
    pub fn or_eq(self, key: impl ColumnRef<Table = T>, value: impl IntoLiteral) -> Self {
        let fragment = text::equal(None, &key, value);
        self.add_condition(Some(Connective::Or), &fragment)
    }

    /// Appends `OR "T".key != value`.
    #[must_use]
    pub fn or_not_eq(self, key: impl ColumnRef<Table = T>, value: impl IntoLiteral) -> Self {
        let fragment = text::not_equal(None, &key, value);
        self.add_condition(Some(Connective::Or), &fragment)
    }

    /// Appends `AND (inner)`.
    ///
    /// `inner` starts from an empty predicate over the same table and
    /// never sees the outer text.
    ///
    /// ```rust
    /// use regsql_core::builder::Projection;
    /// use regsql_derive::Table;
    ///
    /// #[derive(Table)]
    /// pub struct Channel {
    ///     pub id: i64,
    ///     pub kind: String,
    /// }
    ///
    /// let sql = Projection::select(Channel::id())
    ///     .from(None)
    ///     .where_col(Channel::id(), "> 10")
    ///     .and_group(|g| g.or_eq(Channel::kind(), "phone").or_eq(Channel::kind(), "web"))
    ///     .build();
    ///
    /// assert!(sql.ends_with(
    ///     "WHERE \"Channel\".\"id\" > 10 AND \
    ///      (\"Channel\".\"kind\" = 'phone' OR \"Channel\".\"kind\" = 'web')"
    /// ));
    /// ```
    #[must_use]
    pub fn and_group(self, inner: impl FnOnce(Self) -> Self) -> Self {
        self.grouped(Connective::And, inner)
    }

    /// Appends `OR (inner)`.
    #[must_use]
    pub fn or_group(self, inner: impl FnOnce(Self) -> Self) -> Self {
        self.grouped(Connective::Or, inner)
    }

    /// Appends `AND EXISTS (SELECT 1 ...)`.
    ///
    /// `query` receives a projection over `U` seeded with `SELECT 1` and
    /// may return any later stage.
    #[must_use]
    pub fn exists<U: Table, R: fmt::Display>(
        self,
        query: impl FnOnce(Projection<U>) -> R,
    ) -> Self {
        self.exists_with(Connective::And, query)
    }

    /// Appends `OR EXISTS (SELECT 1 ...)`.
    #[must_use]
    pub fn or_exists<U: Table, R: fmt::Display>(
        self,
        query: impl FnOnce(Projection<U>) -> R,
    ) -> Self {
        self.exists_with(Connective::Or, query)
    }

    /// Appends `AND LOWER("T".key) LIKE 'pattern'`.
    ///
    /// The pattern is lower-cased and quoted, so matching ignores case.
    #[must_use]
    pub fn like(self, key: impl ColumnRef<Table = T>, pattern: &str) -> Self {
        self.like_with(Connective::And, None, &key, pattern)
    }

    /// Appends `AND LOWER(alias.key) LIKE 'pattern'`.
    #[must_use]
    pub fn like_as(self, alias: &str, key: impl ColumnRef<Table = T>, pattern: &str) -> Self {
        self.like_with(Connective::And, Some(alias), &key, pattern)
    }

    /// Appends `OR LOWER("T".key) LIKE 'pattern'`.
    #[must_use]
    pub fn or_like(self, key: impl ColumnRef<Table = T>, pattern: &str) -> Self {
        self.like_with(Connective::Or, None, &key, pattern)
    }

    /// Appends `ORDER BY "T".key [DESC]` and opens the ordering stage.
    #[must_use]
    pub fn order_by(self, key: impl ColumnRef<Table = T>, descending: bool) -> Ordering<T> {
        Ordering::start(self.text, &text::qualified(None, &key), descending)
    }

    /// Appends `ORDER BY alias.key [DESC]`.
    #[must_use]
    pub fn order_by_as(
        self,
        alias: &str,
        key: impl ColumnRef<Table = T>,
        descending: bool,
    ) -> Ordering<T> {
        Ordering::start(self.text, &text::qualified(Some(alias), &key), descending)
    }

    /// Appends `ORDER BY column [DESC]` with pre-formatted column text.
    #[must_use]
    pub fn order_by_custom(self, column: &str, descending: bool) -> Ordering<T> {
        Ordering::start(self.text, column, descending)
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

impl<T: Table> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}
