pub mod handlers;
pub mod middlewares;
pub mod router;
pub mod state;

use crate::prelude::Result;
use router::build_routes;
use state::AppState;

pub async fn listen(state: AppState) -> Result<()> {
    let port = state.settings.server_port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("Listening at port {}", port);
    tokio::select! {
        r = axum::serve(listener, build_routes(state)?) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}
