pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use handlers::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::liveness))
        .route("/api/v1/users/:user_id/plan", get(handlers::plan::get_user_plan))
        .route("/api/v1/limits", get(handlers::plan::check_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
