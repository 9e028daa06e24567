//! HTTP route handlers.
//!
//! Each route carries its own CORS headers, applied to every response
//! including errors and pre-flight acknowledgments. Pre-flight (`OPTIONS`)
//! requests are answered with an empty 200 before any handler logic runs.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod contact;
pub mod health;

use axum::{
    http::header::{
        HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    CORS_ALLOW_ORIGIN, CORS_HEALTH_METHODS, CORS_UPDATE_HEADERS, CORS_UPDATE_METHODS,
};
use crate::error::ApiError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Path of the health endpoint
pub const HEALTH_PATH: &str = "/health";

/// Path of the contact language update endpoint
pub const UPDATE_PATH: &str = "/update-contact-language";

/// Empty acknowledgment for CORS pre-flight requests
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Rejects verbs other than GET and OPTIONS on the health route
async fn health_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "GET" }
}

/// Rejects verbs other than PATCH and OPTIONS on the update route
async fn update_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed { allowed: "PATCH" }
}

/// Creates the Axum router with all routes and CORS headers.
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route(
            HEALTH_PATH,
            get(health::health)
                .options(preflight)
                .fallback(health_method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_HEALTH_METHODS),
        ));

    let update_routes = Router::new()
        .route(
            UPDATE_PATH,
            patch(contact::update_language)
                .options(preflight)
                .fallback(update_method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_UPDATE_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_UPDATE_HEADERS),
        ));

    Router::new()
        .merge(health_routes)
        .merge(update_routes)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
