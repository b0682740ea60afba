#![allow(dead_code)]

use regsql_derive::Table;

#[derive(Debug, Clone, Table)]
pub struct User {
    #[column(primary_key, name = "Id")]
    pub id: i64,
    #[column(name = "Name")]
    pub name: String,
    #[column(name = "Email")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Table)]
pub struct Order {
    #[column(primary_key, name = "Id")]
    pub id: i64,
    #[column(name = "UserId")]
    pub user_id: i64,
    #[column(name = "Status")]
    pub status: String,
    #[column(name = "Total")]
    pub total: i64,
    #[column(name = "CreatedAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Table)]
pub struct Service {
    #[column(primary_key)]
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
}

#[derive(Debug, Clone, Table)]
#[table(name = "organizations")]
pub struct Organization {
    #[column(primary_key)]
    pub id: i64,
    pub name: String,
}

/// Collapses whitespace runs so expected SQL can be wrapped freely.
pub fn squash(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Asserts two SQL strings are equal modulo whitespace runs.
pub fn assert_sql(actual: &str, expected: &str) {
    assert_eq!(squash(actual), squash(expected), "\nactual:   {actual}");
}

/// Counts `(` minus `)`, failing if it ever goes negative.
pub fn paren_depth(sql: &str) -> i64 {
    let mut depth = 0i64;
    for c in sql.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                assert!(depth >= 0, "unbalanced `)` in {sql}");
            }
            _ => {}
        }
    }
    depth
}
