//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use crate::error::StoreError;
use crate::metrics::{self, LatencyTimer};
use crate::store::{Fields, User, UserStore};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// User records.
    pub store: UserStore,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around an empty store.
    pub fn new() -> Self {
        Self::with_store(UserStore::new())
    }

    /// Create app state around an existing store.
    pub fn with_store(store: UserStore) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Plain acknowledgement response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: &'static str,
}

/// Parse the `:id` path segment.
///
/// Accepts decimal integers, integral decimals like `2.0` or `1e3`, and
/// `0x`/`0o`/`0b` literals. Anything else, including values beyond
/// `u64`, yields `None`, which never matches a stored id.
pub fn parse_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }

    let radix = match raw.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &raw[2..];
        if digits.starts_with('+') {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok();
    }

    match raw.parse::<f64>() {
        // 2^64 is exactly representable; anything at or above it does not fit.
        Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n < u64::MAX as f64 => {
            Some(n as u64)
        }
        _ => None,
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Create a user from an arbitrary JSON object.
pub async fn create_user(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> impl IntoResponse {
    let _timer = LatencyTimer::new("create_user");
    let user = state.store.create(fields).await;
    metrics::inc_users_created();
    info!(id = ?user.id(), "Created user");
    (StatusCode::CREATED, Json(user))
}

/// List every user.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let _timer = LatencyTimer::new("list_users");
    Json(state.store.list().await)
}

/// Merge the request body into an existing user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<Json<User>, ApiError> {
    let _timer = LatencyTimer::new("update_user");
    let Some(id) = parse_id(&raw_id) else {
        metrics::inc_users_not_found();
        return Err(StoreError::NotFound { id: None }.into());
    };

    match state.store.update(id, fields).await {
        Ok(user) => {
            metrics::inc_users_updated();
            info!(id, "Updated user");
            Ok(Json(user))
        }
        Err(e) => {
            metrics::inc_users_not_found();
            Err(e.into())
        }
    }
}

/// Delete a user. Succeeds whether or not the id exists.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Json<MessageResponse> {
    let _timer = LatencyTimer::new("delete_user");
    if let Some(id) = parse_id(&raw_id) {
        state.store.delete(id).await;
        info!(id, "Deleted user");
    }
    metrics::inc_users_deleted();
    Json(MessageResponse {
        message: "User deleted",
    })
}

/// Render Prometheus metrics, or 404 when no recorder is installed.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
