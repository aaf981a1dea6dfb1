//! # Client Configuration
//!
//! Where the parcel API lives and how the payment handoff is addressed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COURIER_API_URL=https://api.example.com                            │
//! │     COURIER_API_TIMEOUT_SECS=10                                        │
//! │     COURIER_ACCESS_TOKEN=...                                           │
//! │     COURIER_CHECKOUT_PATH=/dashboard/payment/{id}                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/parcel/client.toml (Linux)                               │
//! │     ~/Library/Application Support/com.courier.parcel/client.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000, 30 s timeout                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://parcel-api.example.com"
//! timeout_secs = 30
//! # access_token = "..."
//!
//! [payment]
//! checkout_path = "/dashboard/payment/{id}"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Placeholder replaced by the parcel id in the checkout path.
pub const CHECKOUT_ID_PLACEHOLDER: &str = "{id}";

// =============================================================================
// API Settings
// =============================================================================

/// Parcel API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Static bearer token. A signed-in user's token takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            access_token: None,
        }
    }
}

// =============================================================================
// Payment Settings
// =============================================================================

/// Payment handoff settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Route of the external payment page; `{id}` is the parcel id.
    #[serde(default = "default_checkout_path")]
    pub checkout_path: String,
}

fn default_checkout_path() -> String {
    "/dashboard/payment/{id}".to_string()
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            checkout_path: default_checkout_path(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub payment: PaymentSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if !self.payment.checkout_path.contains(CHECKOUT_ID_PLACEHOLDER) {
            return Err(ClientError::InvalidConfig(format!(
                "checkout_path must contain {}, got: {}",
                CHECKOUT_ID_PLACEHOLDER, self.payment.checkout_path
            )));
        }

        Ok(())
    }

    /// Applies overrides from `COURIER_*` variables looked up through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("COURIER_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("COURIER_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric COURIER_API_TIMEOUT_SECS"),
            }
        }

        if let Some(token) = var("COURIER_ACCESS_TOKEN") {
            debug!("Using access token from environment");
            self.api.access_token = Some(token);
        }

        if let Some(path) = var("COURIER_CHECKOUT_PATH") {
            self.payment.checkout_path = path;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "courier", "parcel")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Checkout route for a parcel, e.g. `/dashboard/payment/665f1c`.
    pub fn checkout_path_for(&self, parcel_id: &str) -> String {
        self.payment
            .checkout_path
            .replace(CHECKOUT_ID_PLACEHOLDER, parcel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.checkout_path_for("abc"), "/dashboard/payment/abc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://files.example.com".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "https://api.example.com".to_string();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        config.payment.checkout_path = "/pay".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.payment.checkout_path = "/pay/{id}".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("COURIER_API_URL", "https://api.example.com"),
            ("COURIER_API_TIMEOUT_SECS", "12"),
            ("COURIER_ACCESS_TOKEN", "secret"),
            ("COURIER_CHECKOUT_PATH", "/checkout/{id}"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        assert_eq!(config.checkout_path_for("p1"), "/checkout/p1");
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|k| (k == "COURIER_API_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client.toml");

        let mut config = ClientConfig::default();
        config.api.base_url = "https://parcel.example.com".to_string();
        config.api.timeout_secs = 7;
        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[payment]"));
        assert!(!contents.contains("access_token"));

        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: ClientConfig = toml::from_str("[api]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(loaded.api.timeout_secs, 5);
        assert_eq!(loaded.api.base_url, "http://localhost:3000");
        assert_eq!(loaded.payment, PaymentSettings::default());
    }

    #[test]
    fn test_invalid_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            ClientConfig::load(Some(path)),
            Err(ClientError::ConfigLoadFailed(_))
        ));
    }
}
