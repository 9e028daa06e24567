//! Health check endpoint.
//!
//! Reports liveness together with whether the HubSpot token is configured.
//! Responds 200 when healthy and 503 when configuration is missing, so load
//! balancers take an unconfigured instance out of rotation.

use axum::{extract::State, response::IntoResponse, Json};

use crate::state::AppState;

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health.check();
    (health.http_status(), Json(health))
}
