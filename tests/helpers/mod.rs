//! Test helpers for a migrated SQLite store

#![allow(dead_code)]

use mealmuse_db::SqliteStore;
use mealmuse_mealplan::Command;
use mealmuse_shared::store::{Collection, RecordStore};
use serde_json::Value;
use temp_dir::TempDir;

pub async fn setup_command(dir: &TempDir) -> anyhow::Result<Command<SqliteStore>> {
    let path = dir.child("mealmuse.sqlite3");
    let url = format!("sqlite:{}", path.display());
    let pool = mealmuse_db::create_pool(&url, 1).await?;
    mealmuse_db::migrate(&pool).await?;

    Ok(Command(SqliteStore::new(pool)))
}

pub async fn seed(
    command: &Command<SqliteStore>,
    collection: Collection,
    data: Value,
) -> anyhow::Result<String> {
    let record = command.0.create(collection, data).await?;

    Ok(record["id"].as_str().unwrap_or_default().to_owned())
}
