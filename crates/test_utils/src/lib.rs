//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built drafts and attachments
//! - `builders`: Builder patterns for test drafts, including randomized ones
//! - `server`: In-process stub of the claims service
//! - `assertions`: Assertion helpers for payloads and recorded requests
//! - `generators`: Property-based test data generators
//! - `mocks`: In-memory port implementations

pub mod fixtures;
pub mod builders;
pub mod server;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use server::*;
pub use assertions::*;
pub use generators::*;

/// In-memory implementations of the claim intake ports
pub mod mocks {
    pub use domain_claims::ports::mock::{
        MockClaimTransport, MockReply, RecordingNotifier, ScriptedConfirmation,
    };
}
