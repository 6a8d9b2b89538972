//! Error types for the resolution system with request context

use thiserror::Error;

/// Errors produced while talking to the mod providers
#[derive(Error, Debug)]
pub enum ResolveError {
    /// HTTP-related errors with context
    #[error("HTTP request to '{url}' failed")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Network timeout with retry suggestion
    #[error("Request to '{url}' timed out after {duration_secs}s (try increasing timeout or check network)")]
    NetworkTimeout {
        url: String,
        duration_secs: u64,
    },

    /// Non-success HTTP status with whatever detail the provider returned
    #[error("Request to '{url}' returned status {status}: {detail}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        detail: String,
    },

    /// Response body did not match the expected payload shape
    #[error("Failed to decode response from '{url}'")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            ResolveError::HttpRequest { .. } => "http_request",
            ResolveError::NetworkTimeout { .. } => "network_timeout",
            ResolveError::UnexpectedStatus { .. } => "unexpected_status",
            ResolveError::Decode { .. } => "decode",
            ResolveError::Configuration { .. } => "configuration",
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.to_string()).unwrap_or_else(|| "<unknown>".to_string());

        if error.is_timeout() {
            ResolveError::NetworkTimeout {
                url,
                duration_secs: 30, // Default timeout assumption
            }
        } else {
            ResolveError::HttpRequest {
                url,
                source: error,
            }
        }
    }
}
