#![allow(dead_code)]

use regsql_derive::Table;
use regsql_sqlite::{ExecutorConfig, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Table, sqlx::FromRow)]
pub struct User {
    #[column(primary_key, name = "Id")]
    #[sqlx(rename = "Id")]
    pub id: i64,
    #[column(name = "Name")]
    #[sqlx(rename = "Name")]
    pub name: String,
    #[column(name = "Email")]
    #[sqlx(rename = "Email")]
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
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE "User" ("Id" INTEGER PRIMARY KEY, "Name" TEXT NOT NULL, "Email" TEXT)"#,
    r#"CREATE TABLE "Order" (
        "Id" INTEGER PRIMARY KEY,
        "UserId" INTEGER NOT NULL REFERENCES "User" ("Id"),
        "Status" TEXT NOT NULL,
        "Total" INTEGER NOT NULL
    )"#,
    r#"INSERT INTO "User" ("Id", "Name", "Email") VALUES
        (1, 'Ada', 'ada@example.com'),
        (2, 'Brian', NULL),
        (3, 'Cleo', 'cleo@EXAMPLE.com')"#,
    r#"INSERT INTO "Order" ("Id", "UserId", "Status", "Total") VALUES
        (1, 1, 'PAID', 150),
        (2, 1, 'NEW', 20),
        (3, 2, 'PAID', 40),
        (4, 2, 'SHIPPED', 300)"#,
];

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Opens a fresh in-memory database loaded with three users and four
/// orders. User 3 has no orders.
pub async fn seeded() -> SqliteExecutor {
    init_tracing();
    let executor = SqliteExecutor::connect(&ExecutorConfig::default())
        .await
        .expect("in-memory database");
    for statement in SCHEMA {
        executor.execute(*statement).await.expect("fixture statement");
    }
    executor
}
