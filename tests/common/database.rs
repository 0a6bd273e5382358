//! Test database setup
#![allow(dead_code)]

use sea_orm::{DatabaseConnection, DbErr};

/// Every test gets its own in-memory SQLite database with the schema applied,
/// so tests can run in parallel without cleanup.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    let db = polls::db::connect("sqlite::memory:", 1).await?;
    polls::db::create_schema(&db).await?;
    Ok(db)
}
