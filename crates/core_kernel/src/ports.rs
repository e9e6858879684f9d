//! Ports and Adapters Infrastructure
//!
//! Shared pieces of the boundary between the claim intake domain and the
//! systems it talks to.
//!
//! ```text
//!        Presentation (form view, CLI)
//!                    │ field edits, submit trigger
//!                    ▼
//!      ClaimFormController (domain_claims)
//!          │              │              │
//!          ▼              ▼              ▼
//!   ClaimTransport   Confirmation     Notifier
//!   (HTTP adapter)  (yes/no prompt) (outcome display)
//! ```
//!
//! Port traits extend [`DomainPort`] and fail with [`PortError`].

use thiserror::Error;
use serde::{Deserialize, Serialize};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Why an adapter could not complete a call
///
/// Any answer the remote side produces is a result, not a `PortError`.
#[derive(Debug, Error)]
pub enum PortError {
    /// The remote side could not be reached or the exchange broke off
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// No answer within the configured limit
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The outgoing request could not be encoded
    #[error("Could not encode {part}: {message}")]
    Transformation {
        part: String,
        message: String,
    },

    /// Anything else the adapter reports
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Encoding failure of one named part of a request
    pub fn transformation(part: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Transformation {
            part: part.into(),
            message: message.into(),
        }
    }

    /// True when the same call may succeed if repeated later
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. } | PortError::Timeout { .. })
    }
}

/// Marker for port traits: shareable across tasks for the program's lifetime
pub trait DomainPort: Send + Sync + 'static {}

/// Reachability of an adapter's remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Reachable, but answering with errors
    Degraded,
    Unhealthy,
}

/// One health probe of an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}
