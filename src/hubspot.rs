//! HubSpot CRM client.
//!
//! The proxy needs exactly one CRM operation: a partial update of a contact,
//! addressed by email, setting its language preference. `ContactLanguageClient`
//! is the seam the updater depends on; `HubSpotClient` is the reqwest-backed
//! implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::{HubSpotConfig, HUBSPOT_CONTACTS_PATH, HUBSPOT_LANGUAGE_PROPERTY, USER_AGENT};
use crate::contact::Language;

/// Failure of the outbound CRM call
#[derive(Debug, Clone, thiserror::Error)]
pub enum HubSpotError {
    /// HubSpot answered with a non-success status
    #[error("HubSpot responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// No response within the request timeout
    #[error("HubSpot request timed out")]
    Timeout,

    /// Connection or protocol failure before a response was received
    #[error("HubSpot transport error: {0}")]
    Transport(String),

    /// Success status with a body we could not read
    #[error("Failed to decode HubSpot response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HubSpotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HubSpotError::Timeout
        } else if err.is_decode() {
            HubSpotError::Decode(err.to_string())
        } else {
            HubSpotError::Transport(err.to_string())
        }
    }
}

/// The part of HubSpot's contact object the proxy uses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactRef {
    pub id: String,
}

/// Outbound contact update body, setting only the language property
fn update_body(language: Language) -> Value {
    json!({ "properties": { HUBSPOT_LANGUAGE_PROPERTY: language.as_str() } })
}

/// Contact language update against the CRM.
///
/// Implementations issue a single attempt; retries are the caller's concern.
#[async_trait]
pub trait ContactLanguageClient: Send + Sync {
    async fn update_contact_language(
        &self,
        email: &str,
        language: Language,
        token: &str,
    ) -> Result<ContactRef, HubSpotError>;
}

/// reqwest-backed HubSpot client.
///
/// The underlying `reqwest::Client` pools connections and is cheap to clone.
#[derive(Clone)]
pub struct HubSpotClient {
    base_url: String,
    client: reqwest::Client,
}

impl HubSpotClient {
    /// Create a client from configuration.
    ///
    /// The configured timeout bounds the whole request, including reading the body.
    pub fn new(config: &HubSpotConfig) -> Result<Self, HubSpotError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HubSpotError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(&config.api_base_url, client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// URL of the contact identified by `email`, using email as the id property
    pub fn contact_url(&self, email: &str) -> String {
        format!(
            "{}{}/{}?idProperty=email",
            self.base_url,
            HUBSPOT_CONTACTS_PATH,
            urlencoding::encode(email)
        )
    }
}

#[async_trait]
impl ContactLanguageClient for HubSpotClient {
    #[tracing::instrument(
        name = "hubspot::update_contact_language",
        skip_all,
        fields(email = %email, language = %language)
    )]
    async fn update_contact_language(
        &self,
        email: &str,
        language: Language,
        token: &str,
    ) -> Result<ContactRef, HubSpotError> {
        let url = self.contact_url(email);
        let body = update_body(language);

        tracing::debug!(property = HUBSPOT_LANGUAGE_PROPERTY, "Sending contact update");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let contact = response.json::<ContactRef>().await?;
            tracing::debug!(contact_id = %contact.id, "HubSpot accepted update");
            Ok(contact)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "HubSpot rejected update");
            Err(HubSpotError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
