//! API routes for kanban-server

pub mod cards;
pub mod extract;
pub mod health;
pub mod lists;
pub mod tags;

use axum::Router;
use axum::routing::get;
use shared::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(lists::router())
        .merge(cards::router())
        .merge(tags::router())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unknown route or unsupported method
async fn not_found() -> AppError {
    AppError::not_found()
}
