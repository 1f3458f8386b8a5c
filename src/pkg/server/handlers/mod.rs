use std::future::Future;
use std::time::Duration;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::prelude::{Error, Result};

pub mod applications;
pub mod probes;
pub mod vacancies;

/// Upper bound on receiving a request body. Handler work is never timed out.
pub const BODY_READ_TIMEOUT: Duration = Duration::from_secs(15);

/// JSON body whose decode failures become a 400 carrying the parse error.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let decode = Json::<T>::from_request(req, state);
        let Json(value) = tokio::time::timeout(BODY_READ_TIMEOUT, decode)
            .await
            .map_err(|_| Error::BodyTimeout)??;
        Ok(Payload(value))
    }
}

/// Body read up front but decoded only when the handler asks for it, so a
/// lookup can answer 404 before the payload is judged.
pub struct RawPayload(Bytes);

impl<S> FromRequest<S> for RawPayload
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = tokio::time::timeout(BODY_READ_TIMEOUT, Bytes::from_request(req, state))
            .await
            .map_err(|_| Error::BodyTimeout)?
            .map_err(|e| Error::BadRequest(e.body_text()))?;
        Ok(RawPayload(bytes))
    }
}

impl RawPayload {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let Json(value) = Json::<T>::from_bytes(&self.0)?;
        Ok(value)
    }
}

/// Path parameters; a segment that does not parse is a 400.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParam(value))
    }
}

/// Row ids are unsigned on the wire. One beyond the store's range cannot
/// exist, so it reads as `missing`.
pub fn row_id(id: u64, missing: &'static str) -> Result<i64> {
    i64::try_from(id).map_err(|_| Error::NotFound(missing))
}

/// Runs `work` on its own task and waits for it. A dropped request stops the
/// wait but not the work, so a committed write always reaches its cache
/// invalidation and a started relay call always finishes.
pub async fn to_completion<F, T>(work: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await?
}
