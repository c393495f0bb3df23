//! HTTP API route definitions.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_user, delete_user, health, list_users, metrics_text, update_user, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Users resource
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
