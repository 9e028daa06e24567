//! Test doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::contact::Language;
use crate::hubspot::{ContactLanguageClient, ContactRef, HubSpotError};

/// A recorded call to the CRM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub email: String,
    pub language: Language,
    pub token: String,
}

/// Stub CRM client returning a canned outcome and recording every call
pub struct StubClient {
    outcome: Result<ContactRef, HubSpotError>,
    calls: AtomicUsize,
    last: Mutex<Option<RecordedCall>>,
}

impl StubClient {
    pub fn returning(outcome: Result<ContactRef, HubSpotError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    /// Stub that accepts every update with the given contact id
    pub fn ok(id: &str) -> Arc<Self> {
        Self::returning(Ok(ContactRef { id: id.to_string() }))
    }

    /// Stub that answers every update with an HTTP status
    pub fn status(status: u16) -> Arc<Self> {
        Self::returning(Err(HubSpotError::Status {
            status,
            body: r#"{"status":"error"}"#.to_string(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactLanguageClient for StubClient {
    async fn update_contact_language(
        &self,
        email: &str,
        language: Language,
        token: &str,
    ) -> Result<ContactRef, HubSpotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(RecordedCall {
            email: email.to_string(),
            language,
            token: token.to_string(),
        });
        self.outcome.clone()
    }
}
