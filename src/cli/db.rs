use anyhow::Result;
use mealmuse::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let pool = mealmuse_db::create_pool(&config.database.url, 1).await?;
    mealmuse_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> Result<()> {
    tracing::info!("Resetting database...");

    mealmuse_db::drop_database(&config.database.url).await?;
    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
