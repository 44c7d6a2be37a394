//! Warden Web Server
//!
//! Axum-based JSON API over the war state, plus on-demand sync and wipe.

pub mod routes;
pub mod state;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
///
/// Only the read routes are open to cross-origin callers; sync and wipe
/// are reachable from same-origin or non-browser clients only.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let read_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/wars", get(routes::wars::list_wars))
        .route("/api/corporations/{id}/wars", get(routes::wars::corporation_wars))
        .layer(cors);

    let maintenance_routes = Router::new()
        .route("/api/sync", post(routes::maintenance::run_sync))
        .route("/api/wipe", post(routes::maintenance::wipe));

    read_routes
        .merge(maintenance_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
