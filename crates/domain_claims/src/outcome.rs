//! Submission outcomes and user-facing notifications

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimReference, PortError};

use crate::ports::TransportResponse;
use crate::submission::SubmissionState;
use crate::validation::ValidationReport;

pub const SUCCESS_MESSAGE: &str = "Claim submitted successfully!";
pub const REJECTED_MESSAGE: &str = "Failed to submit claim. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again later.";

/// Body of a successful submission response
///
/// Only `claim_id` is interpreted. Everything else the server sends is passed
/// through for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub claim_id: ClaimReference,
    /// Link to the generated claim document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    /// Fingerprint of the generated document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub saved_images: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ClaimReceipt {
    pub fn new(claim_id: impl Into<ClaimReference>) -> Self {
        Self {
            claim_id: claim_id.into(),
            pdf: None,
            pdf_hash: None,
            saved_images: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Terminal classification of one submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The user declined the confirmation prompt
    Cancelled,
    /// Pre-submit validation found problems; nothing was sent
    Blocked(ValidationReport),
    /// The server accepted the claim
    Succeeded(ClaimReceipt),
    /// The server answered with a failure status
    RejectedByServer { status: u16 },
    /// The request could not be completed
    TransportFailed { reason: String },
}

impl SubmissionOutcome {
    /// Classifies the result of a dispatched request
    ///
    /// A success status whose body does not carry a claim identifier is a
    /// transport failure: the response could not be read as agreed.
    pub fn classify(result: Result<TransportResponse, PortError>) -> Self {
        match result {
            Ok(response) if response.is_success() => {
                match serde_json::from_slice::<ClaimReceipt>(&response.body) {
                    Ok(receipt) => SubmissionOutcome::Succeeded(receipt),
                    Err(e) => SubmissionOutcome::TransportFailed {
                        reason: format!("unreadable success response: {e}"),
                    },
                }
            }
            Ok(response) => SubmissionOutcome::RejectedByServer {
                status: response.status,
            },
            Err(e) => SubmissionOutcome::TransportFailed {
                reason: e.to_string(),
            },
        }
    }

    /// State reached by the attempt
    pub fn terminal_state(&self) -> SubmissionState {
        match self {
            SubmissionOutcome::Cancelled | SubmissionOutcome::Blocked(_) => SubmissionState::Idle,
            SubmissionOutcome::Succeeded(_) => SubmissionState::Succeeded,
            SubmissionOutcome::RejectedByServer { .. } => SubmissionState::RejectedByServer,
            SubmissionOutcome::TransportFailed { .. } => SubmissionState::TransportFailed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }

    pub fn claim_id(&self) -> Option<&ClaimReference> {
        match self {
            SubmissionOutcome::Succeeded(receipt) => Some(&receipt.claim_id),
            _ => None,
        }
    }

    /// The single message shown to the user, if any
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SubmissionOutcome::Cancelled => None,
            SubmissionOutcome::Blocked(report) => Some(Notification {
                kind: NotificationKind::Incomplete,
                message: format!(
                    "Claim is incomplete: {} issue(s) must be fixed before submitting.",
                    report.errors.len()
                ),
            }),
            SubmissionOutcome::Succeeded(receipt) => Some(Notification {
                kind: NotificationKind::Success,
                message: format!("{SUCCESS_MESSAGE}\nClaim ID: {}", receipt.claim_id),
            }),
            SubmissionOutcome::RejectedByServer { .. } => Some(Notification {
                kind: NotificationKind::Failure,
                message: REJECTED_MESSAGE.to_string(),
            }),
            SubmissionOutcome::TransportFailed { .. } => Some(Notification {
                kind: NotificationKind::NetworkError,
                message: NETWORK_ERROR_MESSAGE.to_string(),
            }),
        }
    }
}

/// Category of a notification, for the presentation layer to style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
    NetworkError,
    Incomplete,
}

/// A human-readable message describing an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> Result<TransportResponse, PortError> {
        Ok(TransportResponse::new(status, body.as_bytes().to_vec()))
    }

    #[test]
    fn test_success_carries_claim_id() {
        let outcome = SubmissionOutcome::classify(response(200, r#"{"claim_id":"C-001"}"#));
        assert_eq!(outcome.terminal_state(), SubmissionState::Succeeded);
        assert_eq!(outcome.claim_id().map(ClaimReference::as_str), Some("C-001"));

        let note = outcome.notification().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert!(note.message.contains("C-001"));
    }

    #[test]
    fn test_success_passes_extra_fields_through() {
        let body = r#"{
            "claim_id": "ab12",
            "pdf": "/api/claims/ab12/pdf",
            "pdf_hash": "deadbeef",
            "saved_images": ["storage/images/ab12_x.png"],
            "weather_summary": {"provider": "open-meteo", "rain_sum_total": 41.2}
        }"#;
        let SubmissionOutcome::Succeeded(receipt) = SubmissionOutcome::classify(response(201, body)) else {
            panic!("expected success");
        };
        assert_eq!(receipt.pdf.as_deref(), Some("/api/claims/ab12/pdf"));
        assert_eq!(receipt.pdf_hash.as_deref(), Some("deadbeef"));
        assert_eq!(receipt.saved_images.len(), 1);
        assert_eq!(receipt.extra["weather_summary"]["provider"], "open-meteo");
    }

    #[test]
    fn test_failure_status_is_rejection_without_id() {
        let outcome = SubmissionOutcome::classify(response(500, "Internal Server Error"));
        assert_eq!(outcome, SubmissionOutcome::RejectedByServer { status: 500 });
        assert!(outcome.claim_id().is_none());

        let note = outcome.notification().unwrap();
        assert_eq!(note.kind, NotificationKind::Failure);
        assert_eq!(note.message, REJECTED_MESSAGE);
    }

    #[test]
    fn test_client_error_status_is_rejection() {
        let outcome = SubmissionOutcome::classify(response(400, r#"{"detail":"Invalid farmLocation"}"#));
        assert_eq!(outcome.terminal_state(), SubmissionState::RejectedByServer);
    }

    #[test]
    fn test_port_error_is_transport_failure() {
        let outcome = SubmissionOutcome::classify(Err(PortError::connection("connection refused")));
        assert_eq!(outcome.terminal_state(), SubmissionState::TransportFailed);
        assert_eq!(outcome.notification().unwrap().message, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_success_without_claim_id_is_transport_failure() {
        for body in ["", "not json", r#"{"status":"ok"}"#] {
            let outcome = SubmissionOutcome::classify(response(200, body));
            assert!(
                matches!(outcome, SubmissionOutcome::TransportFailed { .. }),
                "body {body:?} gave {outcome:?}"
            );
        }
    }

    #[test]
    fn test_cancelled_has_no_notification() {
        assert!(SubmissionOutcome::Cancelled.notification().is_none());
        assert_eq!(SubmissionOutcome::Cancelled.terminal_state(), SubmissionState::Idle);
    }
}
