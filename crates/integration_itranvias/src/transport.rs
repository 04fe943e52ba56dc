//! Query transport
//!
//! Every iTranvias query is a single GET against one endpoint, selected by a
//! function code (`func`) and parameterized by a single datum (`dato`).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ItranviasConfig;
use crate::error::ItranviasError;

/// Remote operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCode {
    /// Real-time bus arrivals for a stop, datum is the stop id
    StopBuses,
    /// Every stop and line of the network, datum is the dataset version
    NetworkSnapshot,
}

impl FunctionCode {
    /// Numeric code sent as `func`
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::StopBuses => 0,
            Self::NetworkSnapshot => 7,
        }
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Low-level request primitive behind every query
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Run one remote query and return its decoded JSON body
    async fn fetch(
        &self,
        function: FunctionCode,
        datum: &str,
    ) -> Result<serde_json::Value, ItranviasError>;
}

/// HTTP transport for the iTranvias query endpoint
#[derive(Debug)]
pub struct HttpQueryTransport {
    client: Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl HttpQueryTransport {
    /// Create a new HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ItranviasConfig) -> Result<Self, ItranviasError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ItranviasError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint_url()?,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Endpoint every query is sent to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Parse a response body into nested JSON data
    fn parse_body(body: &str) -> Result<serde_json::Value, ItranviasError> {
        serde_json::from_str(body).map_err(|e| ItranviasError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl QueryTransport for HttpQueryTransport {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(
        &self,
        function: FunctionCode,
        datum: &str,
    ) -> Result<serde_json::Value, ItranviasError> {
        let params = [("func", function.to_string()), ("dato", datum.to_string())];

        debug!("Querying iTranvias");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ItranviasError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    ItranviasError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ItranviasError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ItranviasError::ServiceUnavailable(format!("HTTP {status}")));
        }

        if !status.is_success() {
            return Err(ItranviasError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ItranviasError::ParseError(e.to_string()))?;

        debug!(bytes = body.len(), "iTranvias response received");
        Self::parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_codes() {
        assert_eq!(FunctionCode::StopBuses.code(), 0);
        assert_eq!(FunctionCode::NetworkSnapshot.code(), 7);
        assert_eq!(FunctionCode::NetworkSnapshot.to_string(), "7");
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let config = ItranviasConfig {
            base_url: "http://localhost:9000".to_string(),
            ..ItranviasConfig::for_testing()
        };
        let transport = HttpQueryTransport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "http://localhost:9000/queryitr_v3.php"
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ItranviasConfig {
            timeout_secs: 0,
            ..ItranviasConfig::default()
        };
        assert!(matches!(
            HttpQueryTransport::new(&config),
            Err(ItranviasError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_parse_body() {
        let data = HttpQueryTransport::parse_body(r#"{ "buses": { "lineas": [] } }"#).unwrap();
        assert!(data["buses"]["lineas"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_body() {
        let result = HttpQueryTransport::parse_body("<html>maintenance</html>");
        assert!(matches!(result, Err(ItranviasError::ParseError(_))));
    }

    #[test]
    fn test_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn QueryTransport>();
    }
}
