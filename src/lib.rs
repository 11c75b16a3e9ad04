pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod import;
pub mod models;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the full application router with CORS and the service banner routes.
pub fn app(state: AppState) -> Router {
    routes::create_router()
        .route("/", get(|| async { "SmartMart Solutions API" }))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
