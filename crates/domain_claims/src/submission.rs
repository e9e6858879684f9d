//! Submission state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the controller is in a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionState {
    /// No attempt in progress
    Idle,
    /// Waiting for the user to confirm
    Confirming,
    /// Request dispatched, awaiting the response
    Submitting,
    /// Claim accepted by the server
    Succeeded,
    /// Server answered with a failure status
    RejectedByServer,
    /// The request could not be completed
    TransportFailed,
}

impl SubmissionState {
    /// Checks if transition is valid
    pub fn can_transition_to(self, target: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, target),
            (Idle, Confirming) |
            (Confirming, Idle) |
            (Confirming, Submitting) |
            (Submitting, Succeeded) |
            (Submitting, RejectedByServer) |
            (Submitting, TransportFailed) |
            (Succeeded, Idle) |
            (RejectedByServer, Idle) |
            (TransportFailed, Idle)
        )
    }

    /// True for the three outcomes of a dispatched request
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded
                | SubmissionState::RejectedByServer
                | SubmissionState::TransportFailed
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
