//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::HubSpotConfig;
use crate::contact::ContactLanguageUpdater;
use crate::health::HealthReporter;
use crate::hubspot::ContactLanguageClient;

/// Shared application state, cheap to clone across handlers.
///
/// Both components receive the HubSpot token at construction, so no handler
/// reads the environment.
#[derive(Clone)]
pub struct AppState {
    pub health: HealthReporter,
    pub updater: ContactLanguageUpdater,
}

impl AppState {
    /// Creates application state from HubSpot settings and a CRM client.
    pub fn new(hubspot: &HubSpotConfig, client: Arc<dyn ContactLanguageClient>) -> Self {
        let token = hubspot.token().map(str::to_string);
        Self {
            health: HealthReporter::new(token.is_some()),
            updater: ContactLanguageUpdater::new(client, token),
        }
    }
}
