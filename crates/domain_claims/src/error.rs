//! Claim intake errors

use thiserror::Error;

/// Errors that can occur while editing or submitting a claim draft
///
/// Submission outcomes (server rejection, transport failure) are not errors
/// here; they are classified into a `SubmissionOutcome`.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unrecognized field identifier: {0}")]
    UnrecognizedField(String),

    #[error("Draft cannot be edited while a submission is in flight")]
    EditWhileSubmitting,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Submission {0} is not the one in flight")]
    UnknownSubmission(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}
