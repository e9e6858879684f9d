//! Claim Intake Domain
//!
//! This crate implements the client side of crop-damage claim intake: a
//! single mutable draft edited field by field, then confirmed, serialised
//! into a multipart payload and submitted in one round-trip.
//!
//! # Submission Lifecycle
//!
//! ```text
//! Idle -> Confirming -> Submitting -> Succeeded | RejectedByServer | TransportFailed -> Idle
//!             |
//!             +-> Idle (declined)
//! ```

pub mod field;
pub mod attachment;
pub mod draft;
pub mod payload;
pub mod submission;
pub mod outcome;
pub mod validation;
pub mod policy;
pub mod ports;
pub mod controller;
pub mod error;

pub use field::FieldId;
pub use attachment::Attachment;
pub use draft::ClaimDraft;
pub use payload::{ClaimPayload, PayloadEntry, DECLARATION_KEY, FILES_KEY};
pub use submission::SubmissionState;
pub use outcome::{ClaimReceipt, Notification, NotificationKind, SubmissionOutcome};
pub use validation::{DraftValidator, ValidationReport};
pub use policy::{SubmissionPolicy, UnknownFieldPolicy};
pub use ports::{ClaimTransport, Confirmation, Notifier, TransportResponse, CONFIRMATION_PROMPT};
pub use controller::{ClaimFormController, Dispatched, Preparation, PreparedSubmission};
pub use error::ClaimError;
