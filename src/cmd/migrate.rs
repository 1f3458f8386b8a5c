use sqlx::{SqlitePool, migrate::Migrator};

use crate::{conf::Settings, pkg::server::state::db_pool, prelude::Result};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!("migrations applied successfully");
    Ok(())
}

pub async fn apply(settings: &Settings) -> Result<()> {
    let pool = db_pool(settings).await?;
    tracing::debug!("connected to db");
    run(&pool).await?;
    pool.close().await;
    Ok(())
}
