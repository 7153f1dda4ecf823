use super::handlers;
use super::state::AppState;
use axum::{Router, routing::get};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(handlers::page::index))
        // API endpoints
        .route("/api/ask", get(handlers::ask::ask))
        // Health check
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
