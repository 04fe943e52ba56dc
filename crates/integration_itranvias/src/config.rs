//! iTranvias client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ItranviasError;

/// Dataset version token the network snapshot is requested for
pub const DEFAULT_DATASET_VERSION: &str = "20160101T000000_gl_0_20160101T000000";

/// Configuration for the iTranvias query service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItranviasConfig {
    /// Base URL of the iTranvias web service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the query endpoint, relative to `base_url`
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Dataset version token sent with network snapshot requests
    #[serde(default = "default_dataset_version")]
    pub dataset_version: String,
}

fn default_base_url() -> String {
    "https://itranvias.com".to_string()
}

fn default_endpoint_path() -> String {
    "queryitr_v3.php".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("integration_itranvias/{}", env!("CARGO_PKG_VERSION"))
}

fn default_dataset_version() -> String {
    DEFAULT_DATASET_VERSION.to_string()
}

impl Default for ItranviasConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            dataset_version: default_dataset_version(),
        }
    }
}

impl ItranviasConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Full URL of the query endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `base_url` is not an absolute URL.
    pub fn endpoint_url(&self) -> Result<Url, ItranviasError> {
        // Without the trailing slash `join` would replace the last path segment.
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };

        Url::parse(&base)
            .and_then(|url| url.join(self.endpoint_path.trim_start_matches('/')))
            .map_err(|e| ItranviasError::ConfigurationError(format!("invalid base_url: {e}")))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ItranviasError> {
        if self.base_url.is_empty() {
            return Err(ItranviasError::ConfigurationError(
                "base_url must not be empty".to_string(),
            ));
        }

        if self.endpoint_path.is_empty() {
            return Err(ItranviasError::ConfigurationError(
                "endpoint_path must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ItranviasError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.dataset_version.trim().is_empty() {
            return Err(ItranviasError::ConfigurationError(
                "dataset_version must not be empty".to_string(),
            ));
        }

        self.endpoint_url().map(|_| ())
    }
}
