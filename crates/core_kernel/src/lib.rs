//! Core Kernel - Foundational types for the claim intake system
//!
//! This crate provides the building blocks shared by the domain and interface crates:
//! - Typed identifiers for form sessions, submission attempts and server-issued claims
//! - Incident date handling for the damage period
//! - Farm geocoordinates parsed from free text
//! - Port error and health types for the hexagonal boundary

pub mod temporal;
pub mod location;
pub mod identifiers;
pub mod ports;

pub use temporal::{IncidentPeriod, TemporalError, parse_form_date};
pub use location::{GeoPoint, LocationError};
pub use identifiers::{DraftId, SubmissionId, ClaimReference};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
