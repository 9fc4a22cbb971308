//! Provider configuration
//!
//! Credentials are kept in a YAML file keyed by provider name:
//!
//! ```yaml
//! providers:
//!   Dummy:
//!     base_url: https://dummyapi.io/data/v1
//!     header_name: app-id
//!     token: "..."
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credentials per provider name (e.g., "Dummy")
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        for (name, provider) in &config.providers {
            provider.validate().map_err(|e| {
                Error::config(format!("Provider '{name}' is misconfigured: {e}"))
            })?;
        }
        Ok(config)
    }

    /// Credentials for a provider
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .get(name)
            .ok_or_else(|| Error::unknown_provider(name))
    }
}

// ============================================================================
// Provider Credentials
// ============================================================================

/// Credentials for a single provider
///
/// Read once when a client is constructed and never mutated afterwards.
/// The token is treated as an opaque string.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the API (e.g., "https://dummyapi.io/data/v1")
    pub base_url: String,

    /// Name of the header carrying the token (e.g., "app-id")
    pub header_name: String,

    /// Access token
    #[serde(default)]
    pub token: String,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    5
}

impl ProviderConfig {
    /// Create credentials with the default timeout
    pub fn new(
        base_url: impl Into<String>,
        header_name: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            header_name: header_name.into(),
            token: token.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Per-request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the fields required to build a client are usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_config_field("base_url"));
        }
        if self.header_name.trim().is_empty() {
            return Err(Error::missing_config_field("header_name"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_config_value("base_url", e.to_string()))?;
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("header_name", &self.header_name)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
