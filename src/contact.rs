//! Contact language updates.
//!
//! `ContactLanguageUpdater` validates an incoming request, issues the single
//! CRM update, and maps the outcome into either a `LanguageUpdate` or an
//! `ApiError`. Validation short-circuits on the first failure, in this order:
//! email, language, configured token.

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::hubspot::ContactLanguageClient;

/// `local@domain.tld`: no whitespace or extra `@` anywhere, and a dot in the domain part
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Supported language preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
}

impl Language {
    /// Parse a wire value. Matching is exact: `"FR"` or `" fr"` are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check an address against the accepted email shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Raw update request as received.
///
/// Fields that are missing or not JSON strings are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub email: Option<String>,
    pub language: Option<String>,
}

impl UpdateRequest {
    #[cfg(test)]
    pub fn new(email: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            language: Some(language.into()),
        }
    }

    /// Parse a request body leniently.
    ///
    /// An empty or malformed body yields an empty request, which then fails
    /// validation on the email field.
    pub fn from_json(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_owned);

        Self {
            email: field("email"),
            language: field("language"),
        }
    }

    /// Validate fields in order, returning the first failure
    pub fn validate(&self) -> Result<ValidatedUpdate, ApiError> {
        let email = self
            .email
            .as_deref()
            .filter(|e| is_valid_email(e))
            .ok_or(ApiError::InvalidEmail)?;

        let language = self
            .language
            .as_deref()
            .and_then(Language::parse)
            .ok_or(ApiError::InvalidLanguage)?;

        Ok(ValidatedUpdate {
            email: email.to_string(),
            language,
        })
    }
}

/// A request whose fields passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub email: String,
    pub language: Language,
}

/// Successful update, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageUpdate {
    pub email: String,
    pub language: Language,
    pub contact_id: String,
    /// Elapsed milliseconds from request entry to completion
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
}

/// Success response body
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: LanguageUpdate,
}

impl From<LanguageUpdate> for UpdateResponse {
    fn from(data: LanguageUpdate) -> Self {
        Self {
            success: true,
            message: "Language updated successfully",
            data,
        }
    }
}

/// Validates update requests and forwards them to the CRM.
///
/// Holds no per-request state; clones share the client.
#[derive(Clone)]
pub struct ContactLanguageUpdater {
    client: Arc<dyn ContactLanguageClient>,
    access_token: Option<String>,
}

impl ContactLanguageUpdater {
    /// Create an updater. An empty token is treated as missing.
    pub fn new(client: Arc<dyn ContactLanguageClient>, access_token: Option<String>) -> Self {
        Self {
            client,
            access_token: access_token.filter(|t| !t.is_empty()),
        }
    }

    /// Run one update.
    ///
    /// `started` is the instant the request entered the handler; the elapsed
    /// time is logged on every outcome and returned on success.
    pub async fn update(
        &self,
        request: &UpdateRequest,
        started: Instant,
    ) -> Result<LanguageUpdate, ApiError> {
        let result = self.try_update(request, started).await;
        let response_time_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(update) => {
                tracing::info!(
                    email = %update.email,
                    language = %update.language,
                    contact_id = %update.contact_id,
                    response_time_ms,
                    "Contact language updated"
                );
            }
            Err(err) if err.is_client_error() => {
                tracing::warn!(
                    error = err.code(),
                    email = request.email.as_deref().unwrap_or(""),
                    response_time_ms,
                    "Rejected contact language update"
                );
            }
            Err(err) => {
                tracing::error!(
                    error = err.code(),
                    detail = %err,
                    email = request.email.as_deref().unwrap_or(""),
                    response_time_ms,
                    "Contact language update failed"
                );
            }
        }

        result
    }

    async fn try_update(
        &self,
        request: &UpdateRequest,
        started: Instant,
    ) -> Result<LanguageUpdate, ApiError> {
        let ValidatedUpdate { email, language } = request.validate()?;
        let token = self.access_token.as_deref().ok_or(ApiError::Configuration)?;

        tracing::info!(email = %email, language = %language, "Updating contact language");

        let contact = self
            .client
            .update_contact_language(&email, language, token)
            .await
            .map_err(|e| ApiError::from_upstream(e, &email))?;

        Ok(LanguageUpdate {
            email,
            language,
            contact_id: contact.id,
            response_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}
