//! Schema traits for typed table and column references.
//!
//! These traits are implemented by the `#[derive(Table)]` macro so that
//! builders can derive table and column names from types instead of
//! strings.

/// Trait for table metadata.
///
/// Implemented by the `{Struct}Table` marker generated from
/// `#[derive(Table)]`.
pub trait Table {
    /// The row type (the derived struct).
    type Row;

    /// The SQL table name, unquoted.
    const NAME: &'static str;

    /// List of all column names, unquoted.
    const COLUMNS: &'static [&'static str];

    /// The primary key column name, if any.
    const PRIMARY_KEY: Option<&'static str>;
}

/// Trait for column metadata.
///
/// Implemented by the column markers generated from `#[derive(Table)]`,
/// one per struct field.
pub trait Column {
    /// The table this column belongs to.
    type Table: Table;

    /// The Rust type of the field.
    type Type;

    /// The SQL column name, unquoted.
    const NAME: &'static str;

    /// Whether this column is nullable.
    const NULLABLE: bool;

    /// Whether this column is the primary key.
    const PRIMARY_KEY: bool;
}

/// Anything a builder accepts where a column of one table is expected.
///
/// Every [`Column`] marker is a `ColumnRef`, and so is a marker wrapped
/// once in [`Converted`]. Nothing else is, so a builder can never be
/// handed an expression it cannot name:
///
/// ```compile_fail
/// use regsql_core::schema::ColumnRef;
///
/// fn name_of(key: impl ColumnRef) -> &'static str {
///     key.name()
/// }
///
/// // A plain value is not a column reference.
/// name_of(42);
/// ```
pub trait ColumnRef {
    /// The table the referenced column belongs to.
    type Table: Table;

    /// The unquoted column name.
    fn name(&self) -> &'static str;
}

impl<C: Column> ColumnRef for C {
    type Table = C::Table;

    fn name(&self) -> &'static str {
        C::NAME
    }
}

/// A column seen through one widening conversion, e.g. an `i32` field
/// compared against an `i64` literal.
///
/// Resolves to the same name as the wrapped column. Only one level is
/// unwrapped: `Converted<Converted<C>>` is not a [`ColumnRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converted<C>(pub C);

impl<C: Column> ColumnRef for Converted<C> {
    type Table = C::Table;

    fn name(&self) -> &'static str {
        C::NAME
    }
}

/// A list of columns belonging to one table.
///
/// Implemented for a single [`ColumnRef`] and for tuples of up to 12 of
/// them. Mixing tables inside one tuple does not compile.
pub trait Columns {
    /// The table all listed columns belong to.
    type Table: Table;

    /// Returns the unquoted column names in order.
    fn names(&self) -> Vec<&'static str>;
}

impl<C: ColumnRef> Columns for C {
    type Table = C::Table;

    fn names(&self) -> Vec<&'static str> {
        vec![self.name()]
    }
}

macro_rules! impl_columns_tuple {
    ($first_idx:tt: $first:ident $(, $idx:tt: $col:ident)*) => {
        impl<$first: ColumnRef, $($col: ColumnRef<Table = <$first as ColumnRef>::Table>),*> Columns
            for ($first, $($col,)*)
        {
            type Table = <$first as ColumnRef>::Table;

            fn names(&self) -> Vec<&'static str> {
                vec![self.$first_idx.name() $(, self.$idx.name())*]
            }
        }
    };
}

impl_columns_tuple!(0: C0);
impl_columns_tuple!(0: C0, 1: C1);
impl_columns_tuple!(0: C0, 1: C1, 2: C2);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10);
impl_columns_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fixtures::{ArticleColumns, ArticleTable, AuthorColumns};

    #[test]
    fn test_column_marker_name() {
        assert_eq!(ArticleColumns::Title.name(), "Title");
    }

    #[test]
    fn test_converted_resolves_like_unwrapped() {
        assert_eq!(
            Converted(ArticleColumns::AuthorId).name(),
            ArticleColumns::AuthorId.name()
        );
    }

    #[test]
    fn test_tuple_names_in_order() {
        let names = (
            ArticleColumns::Id,
            ArticleColumns::Title,
            Converted(ArticleColumns::AuthorId),
        )
            .names();
        assert_eq!(names, vec!["Id", "Title", "AuthorId"]);
    }

    #[test]
    fn test_single_column_list() {
        assert_eq!(AuthorColumns::Name.names(), vec!["Name"]);
    }

    #[test]
    fn test_table_metadata() {
        assert_eq!(ArticleTable::NAME, "Article");
        assert_eq!(ArticleTable::PRIMARY_KEY, Some("Id"));
    }
}
