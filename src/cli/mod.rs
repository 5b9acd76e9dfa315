pub mod calendar;
pub mod dashboard;
pub mod db;
pub mod household;
pub mod shopping;

use std::time::Duration;

use mealmuse::Config;
use mealmuse_db::SqliteStore;
use mealmuse_mealplan::Command;
use mealmuse_shared::generate::HttpMealGenerator;

/// Open the configured database, applying pending migrations first.
pub async fn open_command(config: &Config) -> anyhow::Result<Command<SqliteStore>> {
    let pool =
        mealmuse_db::create_pool(&config.database.url, config.database.max_connections).await?;
    mealmuse_db::migrate(&pool).await?;

    Ok(Command(SqliteStore::new(pool)))
}

pub fn meal_generator(config: &Config) -> anyhow::Result<HttpMealGenerator> {
    Ok(HttpMealGenerator::new(
        config.llm.endpoint.to_owned(),
        config.llm.api_key.to_owned(),
        Duration::from_secs(config.llm.timeout_secs),
    )?)
}
