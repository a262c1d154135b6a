use anyhow::Result;
use sqlx::{Sqlite, migrate::MigrateDatabase};

use folio::Config;

/// Run all database migrations
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!(url = %config.database.url, "Migrating database");

    let pool = folio::db::create_pool(&config.database.url, 1).await?;
    folio::db::migrate(&pool).await?;
    pool.close().await;

    Ok(())
}

/// Drop the database if it exists and recreate it with migrations
pub async fn reset(config: &Config) -> Result<()> {
    if Sqlite::database_exists(&config.database.url).await? {
        Sqlite::drop_database(&config.database.url).await?;
        tracing::info!(url = %config.database.url, "Dropped database");
    }

    migrate(config).await
}
