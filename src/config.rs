//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file, applies the
//! HubSpot token from the environment, and defines constants for the outbound
//! CRM call, CORS headers, logging, and default paths. `AppConfig` is the root
//! configuration struct containing all settings.

use std::fmt;
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "HubSpot Language Proxy";

/// Crate version, reported by the health endpoint and the outbound User-Agent
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent to HubSpot
pub const USER_AGENT: &str = formatcp!("hubspot-language-proxy/{}", SERVICE_VERSION);

// =============================================================================
// HubSpot API
// =============================================================================

/// Default HubSpot API base URL
pub const DEFAULT_HUBSPOT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Path of the contacts object collection, relative to the API base URL
pub const HUBSPOT_CONTACTS_PATH: &str = "/crm/v3/objects/contacts";

/// Contact property holding the language preference
pub const HUBSPOT_LANGUAGE_PROPERTY: &str = "hs_language";

/// Timeout for the single outbound update call
pub const DEFAULT_HUBSPOT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the HubSpot private app token
pub const HUBSPOT_TOKEN_ENV: &str = "HUBSPOT_PRIVATE_APP_TOKEN";

// =============================================================================
// CORS Headers
// =============================================================================
// Applied to every response of the matching route, including errors and
// pre-flight acknowledgments.

pub const CORS_ALLOW_ORIGIN: &str = "*";

pub const CORS_HEALTH_METHODS: &str = "GET, OPTIONS";

pub const CORS_UPDATE_METHODS: &str = "PATCH, OPTIONS";

pub const CORS_UPDATE_HEADERS: &str = "Content-Type, Authorization";

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration file path, used only when it exists
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "hubspot_language_proxy=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Time allowed for in-flight requests to finish after a shutdown signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Outbound HubSpot settings
    #[serde(default)]
    pub hubspot: HubSpotConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

/// HubSpot API settings.
///
/// The access token is normally supplied through `HUBSPOT_PRIVATE_APP_TOKEN`
/// rather than the config file.
#[derive(Clone, Deserialize)]
pub struct HubSpotConfig {
    #[serde(default = "HubSpotConfig::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "HubSpotConfig::default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            request_timeout_seconds: Self::default_timeout(),
            access_token: None,
        }
    }
}

impl fmt::Debug for HubSpotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSpotConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl HubSpotConfig {
    fn default_api_base_url() -> String {
        DEFAULT_HUBSPOT_API_BASE_URL.to_string()
    }

    fn default_timeout() -> u64 {
        DEFAULT_HUBSPOT_TIMEOUT_SECS
    }

    /// The configured token, treating an empty string as absent
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Check if a usable access token is configured
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Override the file-provided token with one from the environment.
    ///
    /// Unset or empty values leave the existing token untouched.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Resolve configuration for startup.
    ///
    /// An explicit path must exist. Without one, `DEFAULT_CONFIG_PATH` is used
    /// when present, otherwise built-in defaults. The token from
    /// `HUBSPOT_PRIVATE_APP_TOKEN` is applied last.
    pub fn resolve(explicit_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };

        config
            .hubspot
            .apply_token_override(std::env::var(HUBSPOT_TOKEN_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("http.port must be non-zero".to_string()));
        }

        if self.hubspot.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "hubspot.request_timeout_seconds must be non-zero".to_string(),
            ));
        }

        let base = &self.hubspot.api_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "hubspot.api_base_url must start with http:// or https:// (got '{}')",
                base
            )));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\" (got '{}')",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
