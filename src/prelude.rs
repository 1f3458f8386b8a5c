use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("timed out reading request body")]
    BodyTimeout,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to send email: {0}")]
    Mail(String),

    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid allowed origin {0:?}")]
    InvalidOrigin(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("request task failed")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BodyTimeout => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Database(e) => tracing::error!("database error: {e}"),
            Error::Migrate(e) => tracing::error!("migration error: {e}"),
            Error::Mail(e) => tracing::warn!("mail relay error: {e}"),
            Error::Io(e) => tracing::error!("io error: {e}"),
            Error::Task(e) => tracing::error!("request task failed: {e}"),
            _ => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_cause_is_not_leaked() {
        let err = Error::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "database error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn mail_error_carries_relay_text() {
        let err = Error::Mail("connection refused".into());
        assert_eq!(err.to_string(), "failed to send email: connection refused");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn slow_body_maps_to_408() {
        assert_eq!(Error::BodyTimeout.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            Error::NotFound("vacancy not found").status(),
            StatusCode::NOT_FOUND
        );
    }
}
