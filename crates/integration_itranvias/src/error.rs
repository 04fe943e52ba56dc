//! iTranvias error types

use thiserror::Error;

/// Errors that can occur while querying the iTranvias service
#[derive(Debug, Error)]
pub enum ItranviasError {
    /// Connection to the iTranvias service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the iTranvias service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not valid JSON or lacked a required field
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// A stop references a line that the network snapshot does not declare
    #[error("Stop {stop_id} references unknown line {line_id}")]
    UnknownLine {
        /// Stop whose `enlaces` list holds the dangling reference
        stop_id: i64,
        /// Line id missing from the snapshot
        line_id: i64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ItranviasError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Returns true if the error came from the remote call rather than from
    /// mapping or configuration
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.is_retryable() || matches!(self, Self::ParseError(_))
    }
}
