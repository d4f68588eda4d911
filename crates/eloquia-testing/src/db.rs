//! In-memory SQLite database for router-level tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Open a fresh in-memory SQLite database and apply every migration of `M`.
///
/// The pool is capped at one connection: each SQLite `:memory:` connection is
/// its own database.
///
/// Panics if the database cannot be opened or migrated.
pub async fn memory_database<M: MigratorTrait>() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("open in-memory sqlite");
    M::up(&db, None).await.expect("apply migrations");
    db
}
