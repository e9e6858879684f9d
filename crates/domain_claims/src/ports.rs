//! Claim Intake Ports
//!
//! The controller depends on three capabilities it does not implement:
//!
//! - **ClaimTransport**: delivers a payload to the claims endpoint
//! - **Confirmation**: asks the user a blocking yes/no question
//! - **Notifier**: shows the outcome of an attempt
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimFormController, ports::ClaimTransport};
//! use std::sync::Arc;
//!
//! let transport: Arc<dyn ClaimTransport> = Arc::new(HttpClaimTransport::new(&config)?);
//! let mut controller = ClaimFormController::new(transport, Arc::new(|_: &str| true));
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::outcome::Notification;
use crate::payload::ClaimPayload;

/// Question put to the user before anything is sent
pub const CONFIRMATION_PROMPT: &str = "Are you sure you want to submit this claim?";

/// Raw response of the claims endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Unparsed response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for delivering a claim to the claims-processing endpoint
#[async_trait]
pub trait ClaimTransport: DomainPort {
    /// Sends the payload in a single request
    ///
    /// Any response the server produces, including failure statuses, is `Ok`.
    /// `Err` means the request could not be completed.
    async fn submit(&self, payload: ClaimPayload) -> Result<TransportResponse, PortError>;
}

/// Port for asking the user to confirm the submission
#[async_trait]
pub trait Confirmation: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

#[async_trait]
impl<F> Confirmation for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Port for surfacing an outcome to the user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification);
}

/// Mock implementations of the claim intake ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Scripted reply of the mock transport
    #[derive(Debug)]
    pub enum MockReply {
        Respond(TransportResponse),
        Fail(PortError),
    }

    /// In-memory transport that records payloads and replays scripted replies
    ///
    /// With no reply scripted it answers `200 {"claim_id":"MOCK-CLAIM"}`.
    #[derive(Debug, Default)]
    pub struct MockClaimTransport {
        replies: Mutex<VecDeque<MockReply>>,
        received: Mutex<Vec<ClaimPayload>>,
        calls: AtomicUsize,
    }

    impl MockClaimTransport {
        /// Creates a new mock transport
        pub fn new() -> Self {
            Self::default()
        }

        /// Replies with the given status and JSON body
        pub fn responding(status: u16, body: impl Into<String>) -> Self {
            Self::scripted(vec![MockReply::Respond(TransportResponse::new(
                status,
                body.into().into_bytes(),
            ))])
        }

        /// Fails with the given error
        pub fn failing(error: PortError) -> Self {
            Self::scripted(vec![MockReply::Fail(error)])
        }

        /// Replays the given replies in order
        pub fn scripted(replies: Vec<MockReply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        /// Queues another reply
        pub async fn push_reply(&self, reply: MockReply) {
            self.replies.lock().await.push_back(reply);
        }

        /// Payloads received so far, in call order
        pub async fn received(&self) -> Vec<ClaimPayload> {
            self.received.lock().await.clone()
        }

        /// Number of submit calls
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockClaimTransport {}

    #[async_trait]
    impl ClaimTransport for MockClaimTransport {
        async fn submit(&self, payload: ClaimPayload) -> Result<TransportResponse, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().await.push(payload);

            match self.replies.lock().await.pop_front() {
                Some(MockReply::Respond(response)) => Ok(response),
                Some(MockReply::Fail(error)) => Err(error),
                None => Ok(TransportResponse::new(200, br#"{"claim_id":"MOCK-CLAIM"}"#.to_vec())),
            }
        }
    }

    /// Confirmation that gives a fixed answer and records the prompts it saw
    #[derive(Debug)]
    pub struct ScriptedConfirmation {
        answer: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedConfirmation {
        pub fn accepting() -> Self {
            Self::answering(true)
        }

        pub fn declining() -> Self {
            Self::answering(false)
        }

        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub async fn prompts(&self) -> Vec<String> {
            self.prompts.lock().await.clone()
        }
    }

    #[async_trait]
    impl Confirmation for ScriptedConfirmation {
        async fn confirm(&self, prompt: &str) -> bool {
            self.prompts.lock().await.push(prompt.to_string());
            self.answer
        }
    }

    /// Notifier that keeps every notification
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn notifications(&self) -> Vec<Notification> {
            self.seen.lock().await.clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: &Notification) {
            self.seen.lock().await.push(notification.clone());
        }
    }
}
