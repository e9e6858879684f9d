//! HTTP Client Layer
//!
//! This crate connects the claim intake domain to the outside world.
//!
//! # Architecture
//!
//! - **Transport**: multipart submission to the claims endpoint (reqwest)
//! - **API**: follow-up calls against the claims service (health, lookup, PDF)
//! - **Console**: terminal confirmation prompt and outcome notifier
//! - **Config**: environment-driven configuration including submission policy
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_client::{config::ClientConfig, transport::HttpClaimTransport};
//!
//! let config = ClientConfig::from_env()?;
//! let transport = Arc::new(HttpClaimTransport::new(&config)?);
//! let mut controller = ClaimFormController::new(transport, Arc::new(ConsoleConfirmation))
//!     .with_policy(config.policy.clone());
//! ```

pub mod config;
pub mod error;
pub mod transport;
pub mod api;
pub mod dto;
pub mod attachments;
pub mod form;
pub mod console;

pub use config::ClientConfig;
pub use error::ClientError;
pub use transport::HttpClaimTransport;
pub use api::ClaimsApi;
pub use console::{ConsoleConfirmation, ConsoleNotifier};
