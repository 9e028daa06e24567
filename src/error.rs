//! Caller-facing error taxonomy.
//!
//! Every failure of the update endpoint ends up as an `ApiError`, which renders
//! as `{"error": CODE, "message": ...}` with a fixed HTTP status. The `Display`
//! output carries server-side detail for logs; the JSON message does not.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::hubspot::HubSpotError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Verb not accepted on this route; `allowed` is the one it expects
    #[error("Method not allowed (expected {allowed})")]
    MethodNotAllowed { allowed: &'static str },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid language")]
    InvalidLanguage,

    #[error("HubSpot token not configured")]
    Configuration,

    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("HubSpot token lacks permissions")]
    InsufficientPermissions,

    #[error("HubSpot rate limit exceeded")]
    RateLimitExceeded,

    #[error("HubSpot API error: {0}")]
    HubSpotApi(u16),

    #[error("HubSpot request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    /// Translate a failed CRM call into the caller-facing taxonomy.
    ///
    /// `email` is the contact the call targeted, echoed in the not-found message.
    pub fn from_upstream(err: HubSpotError, email: &str) -> Self {
        match err {
            HubSpotError::Status { status, .. } => match status {
                404 => ApiError::ContactNotFound(email.to_string()),
                403 => ApiError::InsufficientPermissions,
                429 => ApiError::RateLimitExceeded,
                other => ApiError::HubSpotApi(other),
            },
            HubSpotError::Timeout => ApiError::Timeout,
            HubSpotError::Transport(detail) | HubSpotError::Decode(detail) => {
                ApiError::Internal(detail)
            }
        }
    }

    /// Stable error code exposed to callers
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            ApiError::InvalidEmail => "INVALID_EMAIL",
            ApiError::InvalidLanguage => "INVALID_LANGUAGE",
            ApiError::Configuration => "CONFIGURATION_ERROR",
            ApiError::ContactNotFound(_) => "CONTACT_NOT_FOUND",
            ApiError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            ApiError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ApiError::HubSpotApi(_) => "HUBSPOT_API_ERROR",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidEmail | ApiError::InvalidLanguage => StatusCode::BAD_REQUEST,
            ApiError::ContactNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InsufficientPermissions => StatusCode::FORBIDDEN,
            ApiError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Configuration | ApiError::HubSpotApi(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Human-readable message returned to callers
    pub fn message(&self) -> String {
        match self {
            ApiError::MethodNotAllowed { allowed } => {
                format!("Only {} method allowed", allowed)
            }
            ApiError::InvalidEmail => "Valid email required".to_string(),
            ApiError::InvalidLanguage => "Language must be fr or en".to_string(),
            ApiError::Configuration => "HubSpot token not configured".to_string(),
            ApiError::ContactNotFound(email) => format!("Contact not found: {}", email),
            ApiError::InsufficientPermissions => "HubSpot token lacks permissions".to_string(),
            ApiError::RateLimitExceeded => "Too many requests, try again later".to_string(),
            ApiError::HubSpotApi(status) => format!("HubSpot API error: {}", status),
            ApiError::Timeout => "Request timeout".to_string(),
            ApiError::Internal(_) => "Unexpected error occurred".to_string(),
        }
    }

    /// Whether the caller sent bad input, as opposed to an upstream or server fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::MethodNotAllowed { .. }
                | ApiError::InvalidEmail
                | ApiError::InvalidLanguage
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
