use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::{
    conf::Settings,
    pkg::internal::{
        cache::VacancyCache,
        email::{Notifier, SmtpNotifier},
    },
    prelude::Result,
};

pub async fn db_pool(settings: &Settings) -> Result<Pool<Sqlite>> {
    // concurrent writers queue on the database lock instead of failing fast
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db_pool: Arc<SqlitePool>,
    pub vacancy_cache: Arc<VacancyCache>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub async fn new(settings: Settings) -> Result<AppState> {
        let pool = db_pool(&settings).await?;
        let notifier = Arc::new(SmtpNotifier::new(&settings));
        Ok(AppState::with_parts(settings, pool, notifier))
    }

    pub fn with_parts(
        settings: Settings,
        pool: SqlitePool,
        notifier: Arc<dyn Notifier>,
    ) -> AppState {
        AppState {
            settings: Arc::new(settings),
            db_pool: Arc::new(pool),
            vacancy_cache: Arc::new(VacancyCache::new()),
            notifier,
        }
    }
}
