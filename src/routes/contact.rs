//! Handler for contact language updates.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::contact::{UpdateRequest, UpdateResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Handler for `PATCH /update-contact-language`.
///
/// The body is parsed leniently so that a missing, malformed or unreadable
/// (e.g. over the size limit) body reports `INVALID_EMAIL` rather than a
/// framework error.
pub async fn update_language(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let started = Instant::now();
    let request = match body {
        Ok(body) => UpdateRequest::from_json(&body),
        Err(rejection) => {
            tracing::warn!(
                status = rejection.status().as_u16(),
                error = %rejection.body_text(),
                "Unreadable request body"
            );
            UpdateRequest::default()
        }
    };
    let update = state.updater.update(&request, started).await?;
    Ok(Json(update.into()))
}
