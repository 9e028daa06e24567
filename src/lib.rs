//! HubSpot Language Proxy.
//!
//! A small HTTP service that validates a contact's email and language
//! preference and forwards the update to the HubSpot CRM, translating
//! HubSpot's failures into a stable set of error codes. A health endpoint
//! reports whether the HubSpot token is configured.

pub mod config;
pub mod contact;
pub mod error;
pub mod health;
pub mod http;
pub mod hubspot;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
