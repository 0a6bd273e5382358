//! Database connection and schema setup.

use crate::orm::{choices, questions};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

/// Open a connection pool to `url`.
///
/// In-memory SQLite databases exist per connection, so they are always opened
/// with a single connection regardless of `max_connections`.
pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    if url.starts_with("sqlite::memory:") {
        options.max_connections(1);
    } else {
        options.max_connections(max_connections);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    log::info!("Connected to database ({:?})", db.get_database_backend());
    Ok(db)
}

/// Create the questions and choices tables if they don't exist yet.
///
/// Tables are derived from the entities, so `choices.question_id` carries its
/// `ON DELETE CASCADE` foreign key.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_questions = schema.create_table_from_entity(questions::Entity);
    create_questions.if_not_exists();
    db.execute(backend.build(&create_questions)).await?;

    let mut create_choices = schema.create_table_from_entity(choices::Entity);
    create_choices.if_not_exists();
    db.execute(backend.build(&create_choices)).await?;

    log::debug!("Schema ready");
    Ok(())
}
