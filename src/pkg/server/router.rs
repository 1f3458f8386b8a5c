use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::probes::{healthz, livez};
use super::handlers::{applications, vacancies};
use super::middlewares::cors;
use super::state::AppState;
use crate::prelude::Result;

pub fn build_routes(state: AppState) -> Result<Router> {
    let public = Router::new()
        .route("/vacancies", get(vacancies::list))
        .route("/vacancies/{id}", get(vacancies::retrieve))
        .route("/apply", post(applications::apply))
        .layer(cors::public());

    let admin = Router::new()
        .route("/vacancy", post(vacancies::create))
        .route(
            "/vacancy/{id}",
            put(vacancies::update).delete(vacancies::delete),
        )
        .route("/vacancies", get(vacancies::list))
        .route("/applications", get(applications::list))
        .route(
            "/application/{id}",
            get(applications::retrieve)
                .put(applications::update)
                .delete(applications::delete),
        )
        .route(
            "/application/{id}/send-email",
            post(applications::send_email),
        )
        .layer(cors::admin(&state.settings.admin_allowed_origins)?);

    let app = Router::new()
        .nest("/api", public)
        .nest("/admin", admin)
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
