//! Source stage: `FROM`, `INNER JOIN` and `WITH`.

use std::fmt;
use std::marker::PhantomData;

use super::ordering::Ordering;
use super::predicate::Predicate;
use super::text::{self, QueryText};
use crate::schema::{ColumnRef, Table};

/// Builds the data source of a query.
///
/// Joins pivot `T` to the joined table: after
/// `.inner_join(User::id(), Order::user_id())` the builder is a
/// `Source<OrderTable>`, and un-aliased calls refer to `"Order"`.
pub struct Source<T: Table> {
    text: QueryText,
    _table: PhantomData<T>,
}

impl<T: Table> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            _table: PhantomData,
        }
    }
}

impl<T: Table> Source<T> {
    pub(crate) const fn from_text(text: QueryText) -> Self {
        Self {
            text,
            _table: PhantomData,
        }
    }

    fn join<U: Table>(
        mut self,
        first_alias: Option<&str>,
        first_key: &impl ColumnRef<Table = T>,
        second_alias: Option<&str>,
        second_key: &impl ColumnRef<Table = U>,
    ) -> Source<U> {
        self.text.append(" INNER JOIN ");
        self.text.append(&text::table_name_or_alias::<U>(None));
        if let Some(alias) = second_alias {
            self.text.append(&format!(" AS {alias}"));
        }
        self.text.append(&format!(
            " ON {} = {}",
            text::qualified(first_alias, first_key),
            text::qualified(second_alias, second_key)
        ));
        Source::from_text(self.text)
    }

    /// Appends `INNER JOIN "U" ON "T".first = "U".second` and pivots to `U`.
    #[must_use]
    pub fn inner_join<U: Table>(
        self,
        first_key: impl ColumnRef<Table = T>,
        second_key: impl ColumnRef<Table = U>,
    ) -> Source<U> {
        self.join(None, &first_key, None, &second_key)
    }

    /// Appends `INNER JOIN "U" [AS second_alias] ON first = second` and
    /// pivots to `U`.
    ///
    /// `first_alias` names the already-present table when it was
    /// introduced under an alias.
    #[must_use]
    pub fn inner_join_as<U: Table>(
        self,
        first_alias: Option<&str>,
        first_key: impl ColumnRef<Table = T>,
        second_alias: Option<&str>,
        second_key: impl ColumnRef<Table = U>,
    ) -> Source<U> {
        self.join(first_alias, &first_key, second_alias, &second_key)
    }

    /// Pivots to `U` without writing anything.
    ///
    /// Used to address a table introduced by raw text or an earlier join.
    #[must_use]
    pub fn using<U: Table>(self) -> Source<U> {
        Source::from_text(self.text)
    }

    /// Prefixes the statement with `WITH with_alias AS (with_query)` and
    /// appends `JOIN with_alias ON with_alias.with_key = table.entity_key`.
    ///
    /// `with_key` names a column produced by `with_query`; `W` is the
    /// table that column was selected from.
    #[must_use]
    pub fn with<W: Table>(
        mut self,
        with_alias: &str,
        with_query: &impl fmt::Display,
        with_key: impl ColumnRef<Table = W>,
        table_alias: Option<&str>,
        entity_key: impl ColumnRef<Table = T>,
    ) -> Self {
        self.text.prepend_cte(with_alias, with_query);
        self.text.append(&format!(
            " JOIN {with_alias} ON {} = {}",
            text::qualified(Some(with_alias), &with_key),
            text::qualified(table_alias, &entity_key)
        ));
        self
    }

    /// Opens the predicate stage without a condition.
    ///
    /// ` WHERE` is written together with the first condition, which
    /// carries no connective. If none is ever added, no `WHERE` is
    /// rendered.
    #[must_use]
    pub fn where_(self) -> Predicate<T> {
        Predicate::from_text(self.text, true)
    }

    /// Appends `WHERE "T".key condition`, e.g. `condition = "= 5"`.
    #[must_use]
    pub fn where_col(self, key: impl ColumnRef<Table = T>, condition: &str) -> Predicate<T> {
        self.where_().and(key, condition)
    }

    /// Appends `WHERE alias.key condition`.
    #[must_use]
    pub fn where_col_as(
        self,
        alias: &str,
        key: impl ColumnRef<Table = T>,
        condition: &str,
    ) -> Predicate<T> {
        self.where_().and_as(alias, key, condition)
    }

    /// Appends `WHERE first condition second`, comparing two tables,
    /// e.g. `condition = "<>"`.
    #[must_use]
    pub fn where_compare<U: Table>(
        self,
        first_alias: Option<&str>,
        first_key: impl ColumnRef<Table = T>,
        condition: &str,
        second_alias: Option<&str>,
        second_key: impl ColumnRef<Table = U>,
    ) -> Predicate<T> {
        self.where_()
            .and_compare(first_alias, first_key, condition, second_alias, second_key)
    }

    /// Appends `ORDER BY "T".key [DESC]` with no `WHERE` clause.
    #[must_use]
    pub fn order_by(self, key: impl ColumnRef<Table = T>, descending: bool) -> Ordering<T> {
        Ordering::start(self.text, &text::qualified(None, &key), descending)
    }

    /// Appends `ORDER BY alias.key [DESC]` with no `WHERE` clause.
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

    /// Renders this source chain in parentheses, for use as a derived
    /// table or grouped sub-chain.
    #[must_use]
    pub fn embrace(&self) -> String {
        text::embrace(&self.text.to_string())
    }

    /// Renders the query.
    #[must_use]
    pub fn build(&self) -> String {
        self.text.render()
    }
}

impl<T: Table> fmt::Display for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fixtures::{ArticleColumns, ArticleTable, AuthorColumns, AuthorTable};
    use crate::builder::Projection;

    fn articles() -> Source<ArticleTable> {
        Projection::select((ArticleColumns::Id, ArticleColumns::Title)).from(None)
    }

    #[test]
    fn test_inner_join_pivots_to_joined_table() {
        let s = articles().inner_join(ArticleColumns::AuthorId, AuthorColumns::Id);
        assert_eq!(
            s.to_string(),
            "SELECT \"Article\".\"Id\", \"Article\".\"Title\" FROM \"Article\" \
             INNER JOIN \"Author\" ON \"Article\".\"AuthorId\" = \"Author\".\"Id\""
        );
        let p = s.where_col(AuthorColumns::Name, "= 'Ada'");
        assert!(p.to_string().ends_with("WHERE \"Author\".\"Name\" = 'Ada'"));
    }

    #[test]
    fn test_inner_join_as() {
        let s = Projection::select_as("a", ArticleColumns::Id)
            .from(Some("a"))
            .inner_join_as(Some("a"), ArticleColumns::AuthorId, Some("au"), AuthorColumns::Id);
        assert_eq!(
            s.to_string(),
            "SELECT a.\"Id\" FROM \"Article\" AS a \
             INNER JOIN \"Author\" AS au ON a.\"AuthorId\" = au.\"Id\""
        );
    }

    #[test]
    fn test_using_pivots_without_text() {
        let before = articles().to_string();
        let s: Source<AuthorTable> = articles().using::<AuthorTable>();
        assert_eq!(s.to_string(), before);
    }

    #[test]
    fn test_where_variants() {
        let p = articles().where_col(ArticleColumns::Views, "> 10");
        assert!(p.to_string().ends_with(" WHERE \"Article\".\"Views\" > 10"));

        let p = Projection::select_as("a", ArticleColumns::Id)
            .from(Some("a"))
            .where_col_as("a", ArticleColumns::Views, "IS NULL");
        assert!(p.to_string().ends_with(" WHERE a.\"Views\" IS NULL"));

        let p = articles().inner_join(ArticleColumns::AuthorId, AuthorColumns::Id).where_compare(
            None,
            AuthorColumns::Id,
            "<>",
            Some("x"),
            ArticleColumns::Id,
        );
        assert!(p.to_string().ends_with(" WHERE \"Author\".\"Id\" <> x.\"Id\""));
    }

    #[test]
    fn test_with_prefixes_cte_and_joins_it() {
        let popular = Projection::select(ArticleColumns::AuthorId)
            .from(None)
            .where_col(ArticleColumns::Views, "> 1000");
        let s = Projection::select(AuthorColumns::Name).from(None).with(
            "popular",
            &popular,
            ArticleColumns::AuthorId,
            None,
            AuthorColumns::Id,
        );
        assert_eq!(
            s.to_string(),
            "WITH popular AS (SELECT \"Article\".\"AuthorId\" FROM \"Article\" \
             WHERE \"Article\".\"Views\" > 1000) \
             SELECT \"Author\".\"Name\" FROM \"Author\" \
             JOIN popular ON popular.\"AuthorId\" = \"Author\".\"Id\""
        );
    }

    #[test]
    fn test_with_survives_later_stages() {
        let sql = Projection::select(AuthorColumns::Name)
            .from(None)
            .with(
                "p",
                &"SELECT 1 AS \"AuthorId\"",
                ArticleColumns::AuthorId,
                None,
                AuthorColumns::Id,
            )
            .where_col(AuthorColumns::Name, "LIKE 'A%'")
            .build();
        assert!(sql.starts_with("WITH p AS (SELECT 1 AS \"AuthorId\") SELECT"));
        assert!(sql.ends_with("WHERE \"Author\".\"Name\" LIKE 'A%'"));
    }

    #[test]
    fn test_where_without_condition_is_omitted() {
        let sql = articles()
            .where_()
            .order_by(ArticleColumns::Title, true)
            .build();
        assert_eq!(
            sql,
            "SELECT \"Article\".\"Id\", \"Article\".\"Title\" FROM \"Article\" \
             ORDER BY \"Article\".\"Title\" DESC"
        );
        assert_eq!(articles().where_().build(), articles().build());
    }

    #[test]
    fn test_embrace_wraps_whole_chain() {
        assert_eq!(
            articles().embrace(),
            "(SELECT \"Article\".\"Id\", \"Article\".\"Title\" FROM \"Article\")"
        );
    }

    #[test]
    fn test_order_and_limit_without_where() {
        let sql = articles()
            .order_by(ArticleColumns::Title, false)
            .limit(5, None);
        assert!(sql.ends_with("FROM \"Article\" ORDER BY \"Article\".\"Title\" LIMIT 5"));

        let sql = articles().limit(1, Some(2));
        assert!(sql.ends_with("FROM \"Article\" LIMIT 1 OFFSET 2"));
    }

    #[test]
    fn test_branching_from_cloned_source() {
        let base = articles();
        let a = base.clone().where_col(ArticleColumns::Views, "> 1").build();
        let b = base.clone().where_col(ArticleColumns::Views, "< 1").build();
        assert_ne!(a, b);
        assert_eq!(base.build(), articles().build());
    }
}
