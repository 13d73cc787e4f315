//! Client configuration
//!
//! `ClientConfig` carries every process-wide setting the client needs: base
//! URLs, API version, default timezone and scope, and the fields an event must
//! carry before it is upserted. It is immutable once handed to a client, so
//! tests can point a client at a mock server without touching globals.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Defaults
// ============================================================================

/// Base URL for API operations and the token endpoints
pub const API_BASE_URL: &str = "https://api.cronofy.com";

/// API version path segment
pub const API_VERSION: &str = "v1";

/// Base URL for the user-facing authorization page
pub const APP_BASE_URL: &str = "https://app.cronofy.com";

/// Timezone sent with event and free/busy queries when none is given
pub const DEFAULT_TIMEZONE_ID: &str = "Etc/UTC";

/// Scopes requested by `user_auth_link` when the caller passes none
pub const DEFAULT_OAUTH_SCOPE: &[&str] = &[
    "read_account",
    "list_calendars",
    "read_events",
    "create_event",
    "delete_event",
];

/// Fields an event must carry before it is sent to `calendars/{id}/events`
pub const EVENTS_REQUIRED_FIELDS: &[&str] = &["event_id", "summary", "start", "end"];

/// Environment variable overriding `api_base_url`
pub const ENV_API_BASE_URL: &str = "CRONOFY_API_BASE_URL";

/// Environment variable overriding `app_base_url`
pub const ENV_APP_BASE_URL: &str = "CRONOFY_APP_BASE_URL";

/// Environment variable overriding `default_tzid`
pub const ENV_TZID: &str = "CRONOFY_TZID";

// ============================================================================
// ClientConfig
// ============================================================================

/// Settings shared by every request a client makes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for API operations (token endpoints live here too)
    pub api_base_url: String,
    /// Version segment inserted between the base URL and endpoints
    pub api_version: String,
    /// Base URL hosting `oauth/authorize`
    pub app_base_url: String,
    /// Default timezone for event and free/busy queries
    pub default_tzid: String,
    /// Default OAuth scopes
    pub default_scope: Vec<String>,
    /// Fields checked by `upsert_event` before sending
    pub events_required_fields: Vec<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            app_base_url: APP_BASE_URL.to_string(),
            default_tzid: DEFAULT_TIMEZONE_ID.to_string(),
            default_scope: DEFAULT_OAUTH_SCOPE.iter().map(ToString::to_string).collect(),
            events_required_fields: EVENTS_REQUIRED_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            timeout: Duration::from_secs(30),
            user_agent: format!("cronofy-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from YAML (JSON is accepted too, being a YAML subset)
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply `CRONOFY_*` environment overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_APP_BASE_URL) {
            self.app_base_url = url;
        }
        if let Some(tzid) = lookup(ENV_TZID) {
            self.default_tzid = tzid;
        }
        self
    }

    /// Check the base URLs parse and required settings are non-empty
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("app_base_url", &self.app_base_url),
        ] {
            if value.is_empty() {
                return Err(Error::missing_field(field));
            }
            url::Url::parse(value).map_err(|e| Error::invalid_value(field, e.to_string()))?;
        }
        if self.api_version.is_empty() {
            return Err(Error::missing_field("api_version"));
        }
        Ok(())
    }

    /// Versioned API root, e.g. `https://api.cronofy.com/v1`
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Token exchange endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.api_base_url.trim_end_matches('/'))
    }

    /// Token revocation endpoint
    pub fn revoke_url(&self) -> String {
        format!("{}/oauth/token/revoke", self.api_base_url.trim_end_matches('/'))
    }

    /// Authorization page URL
    pub fn authorize_url(&self) -> String {
        format!("{}/oauth/authorize", self.app_base_url.trim_end_matches('/'))
    }

    /// Default scopes joined with spaces, as the authorize endpoint expects
    pub fn default_scope_string(&self) -> String {
        self.default_scope.join(" ")
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Set the API version segment
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the app (authorization) base URL
    pub fn app_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.app_base_url = url.into();
        self
    }

    /// Point both base URLs at the same host (handy for mock servers)
    pub fn base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url(url.clone()).app_base_url(url)
    }

    /// Set the default timezone
    pub fn default_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.config.default_tzid = tzid.into();
        self
    }

    /// Replace the default OAuth scopes
    pub fn default_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.default_scope = scope.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the required event fields
    pub fn events_required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.events_required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
