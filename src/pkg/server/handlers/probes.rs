use axum::{Json, extract::State};
use serde_json::{Value, json};
use sqlx::query;

use crate::{pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Json<Value> {
    tracing::debug!("service is live");
    Json(json!({ "status": "live" }))
}

/// Store round trip plus whether the vacancy list is currently cached.
pub async fn healthz(State(state): State<AppState>) -> Result<Json<Value>> {
    query("select 1").execute(&*state.db_pool).await?;
    let cache_warm = state.vacancy_cache.is_populated().await;
    tracing::debug!("service is healthy, vacancy cache warm: {}", cache_warm);
    Ok(Json(json!({ "status": "healthy", "vacancyCacheWarm": cache_warm })))
}
