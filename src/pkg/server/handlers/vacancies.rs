use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use super::{PathParam, Payload, row_id, to_completion};
use crate::{
    pkg::{
        internal::adaptors::vacancies::{
            mutators::VacancyMutator,
            selectors::VacancySelector,
            spec::{VacancyEntry, VacancyInput},
        },
        server::state::AppState,
    },
    prelude::{Error, Result},
};

const NOT_FOUND: &str = "vacancy not found";

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let vacancies = state
        .vacancy_cache
        .list_or_fetch(|| async {
            let mut conn = state.db_pool.acquire().await?;
            VacancySelector::new(&mut conn).get_all().await
        })
        .await?;
    Ok(Json(json!({ "vacancies": vacancies.as_slice() })))
}

pub async fn retrieve(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<VacancyEntry>> {
    let id = row_id(id, NOT_FOUND)?;
    let vacancy = state
        .vacancy_cache
        .find_or_fetch(id, || async {
            let mut conn = state.db_pool.acquire().await?;
            VacancySelector::new(&mut conn).get_by_id(id).await
        })
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))?;
    Ok(Json(vacancy))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(input): Payload<VacancyInput>,
) -> Result<(StatusCode, Json<VacancyEntry>)> {
    let vacancy = to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        let vacancy = VacancyMutator::new(&mut conn).create(input).await;
        state.vacancy_cache.invalidate().await;
        vacancy
    })
    .await?;
    tracing::info!("created vacancy {} ({})", vacancy.id, &vacancy.title);
    Ok((StatusCode::CREATED, Json(vacancy)))
}

/// Merge update: blank fields in the payload keep their stored value. The
/// single `UPDATE .. RETURNING` doubles as the existence check.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
    Payload(input): Payload<VacancyInput>,
) -> Result<Json<VacancyEntry>> {
    let id = row_id(id, NOT_FOUND)?;
    let updated = to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        let updated = VacancyMutator::new(&mut conn).update(id, input).await;
        state.vacancy_cache.invalidate().await;
        updated
    })
    .await?
    .ok_or(Error::NotFound(NOT_FOUND))?;
    tracing::info!("updated vacancy {}", id);
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
) -> Result<StatusCode> {
    let id = row_id(id, NOT_FOUND)?;
    let deleted = to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        let deleted = VacancyMutator::new(&mut conn).delete(id).await;
        state.vacancy_cache.invalidate().await;
        deleted
    })
    .await?;
    tracing::info!("delete vacancy {}: removed={}", id, deleted);
    Ok(StatusCode::NO_CONTENT)
}
