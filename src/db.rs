use migration::Migrator;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

/// Opens the database and creates the `movie` table if it is missing.
pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    if !database_url.contains(":memory:") {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA journal_mode=WAL".to_string(),
        ))
        .await?;
    }

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA synchronous=NORMAL".to_string(),
    ))
    .await?;

    Migrator::up(&db, None).await?;
    tracing::debug!("schema up to date");
    Ok(db)
}
