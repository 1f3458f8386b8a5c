use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{PathParam, Payload, RawPayload, row_id, to_completion};
use crate::{
    pkg::{
        internal::adaptors::{
            applications::{
                mutators::ApplicationMutator,
                selectors::ApplicationSelector,
                spec::{ApplicationEntry, ApplicationInput},
            },
            null_as_default,
        },
        server::state::AppState,
    },
    prelude::{Error, Result},
};

const NOT_FOUND: &str = "application not found";

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct EmailInput {
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
}

pub async fn apply(
    State(state): State<AppState>,
    Payload(input): Payload<ApplicationInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let application = to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        ApplicationMutator::new(&mut conn).create(input).await
    })
    .await?;
    tracing::info!(
        "new application {} from {} for vacancy {}",
        application.id,
        &application.name,
        application.vacancy_id
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "application received" })),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    let applications = ApplicationSelector::new(&mut conn).get_all().await?;
    Ok(Json(json!({ "applications": applications })))
}

pub async fn retrieve(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
) -> Result<Json<ApplicationEntry>> {
    let id = row_id(id, NOT_FOUND)?;
    let mut conn = state.db_pool.acquire().await?;
    let application = ApplicationSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound(NOT_FOUND))?;
    Ok(Json(application))
}

/// Full replace: fields missing from the payload are cleared.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
    Payload(input): Payload<ApplicationInput>,
) -> Result<Json<ApplicationEntry>> {
    let id = row_id(id, NOT_FOUND)?;
    let application = to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        ApplicationMutator::new(&mut conn).replace(id, input).await
    })
    .await?
    .ok_or(Error::NotFound(NOT_FOUND))?;
    tracing::info!("application {} now {:?}", id, &application.status);
    Ok(Json(application))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
) -> Result<StatusCode> {
    let id = row_id(id, NOT_FOUND)?;
    to_completion(async move {
        let mut conn = state.db_pool.acquire().await?;
        ApplicationMutator::new(&mut conn).delete(id).await
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Looks the application up before judging the body, so an unknown id is a
/// 404 whatever was sent.
pub async fn send_email(
    State(state): State<AppState>,
    PathParam(id): PathParam<u64>,
    payload: RawPayload,
) -> Result<Json<Value>> {
    let id = row_id(id, NOT_FOUND)?;
    let application = {
        let mut conn = state.db_pool.acquire().await?;
        ApplicationSelector::new(&mut conn)
            .get_by_id(id)
            .await?
            .ok_or(Error::NotFound(NOT_FOUND))?
    };
    let input: EmailInput = payload.decode()?;
    to_completion(async move {
        state
            .notifier
            .send(&application.primary_contact, &input.subject, &input.body)
            .await
    })
    .await?;
    Ok(Json(json!({ "status": "email sent" })))
}
