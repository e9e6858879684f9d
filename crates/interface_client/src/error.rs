//! Client error handling

use std::time::Duration;

use thiserror::Error;

use core_kernel::PortError;
use domain_claims::ClaimError;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

impl ClientError {
    /// Returns true for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Maps a reqwest failure onto the port error taxonomy
pub(crate) fn port_error(operation: &str, timeout: Option<Duration>, err: reqwest::Error) -> PortError {
    if err.is_timeout() {
        PortError::Timeout {
            operation: operation.to_string(),
            duration_ms: timeout.map(|t| t.as_millis() as u64).unwrap_or_default(),
        }
    } else if err.is_connect() || err.is_request() || err.is_body() {
        PortError::Connection {
            message: format!("{operation}: {err}"),
            source: Some(Box::new(err)),
        }
    } else {
        PortError::Internal {
            message: format!("{operation}: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
