use std::{str::FromStr, time::Duration};

use sqlx::{
    Sqlite, SqlitePool,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use sqlx_migrator::{Info, Migrate, Migrator, Plan};

mod m0001;
mod store;
pub mod table;

pub use store::SqliteStore;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::M0001)])?;

    Ok(migrator)
}

/// Apply every pending migration.
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}

/// Create a pool with WAL journaling and a busy timeout.
///
/// The database file is created when missing. `sqlite::memory:` databases are
/// private to a connection, so callers using one should pass a single
/// connection.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Created pool with {} max connections", max_connections);

    Ok(pool)
}

/// Drop the database when it exists. Returns whether anything was dropped.
pub async fn drop_database(database_url: &str) -> anyhow::Result<bool> {
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!("Database does not exist, nothing to drop");
        return Ok(false);
    }

    tracing::warn!("Dropping existing database: {}", database_url);
    Sqlite::drop_database(database_url).await?;

    Ok(true)
}
