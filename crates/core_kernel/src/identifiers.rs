//! Strongly-typed identifiers
//!
//! Locally generated identifiers are newtype wrappers around UUIDs so a form
//! session can never be confused with a submission attempt. Claim identifiers
//! are issued by the claims server and stay opaque on this side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

// One form session
define_id!(DraftId, "DRF");
// One dispatched submission attempt
define_id!(SubmissionId, "SUB");

/// Claim identifier issued by the claims server on acceptance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimReference(String);

impl ClaimReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClaimReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_id_display() {
        let id = DraftId::new();
        assert!(id.to_string().starts_with("DRF-"));
    }

    #[test]
    fn test_id_parsing_with_and_without_prefix() {
        let original = SubmissionId::new_v7();
        let parsed: SubmissionId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: SubmissionId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = SubmissionId::new_v7();
        let second = SubmissionId::new_v7();
        assert!(first.as_uuid() < second.as_uuid());
    }

    #[test]
    fn test_claim_reference_is_transparent() {
        let reference = ClaimReference::from("C-001");
        assert_eq!(serde_json::to_string(&reference).unwrap(), "\"C-001\"");

        let back: ClaimReference = serde_json::from_str("\"9f2c\"").unwrap();
        assert_eq!(back.as_str(), "9f2c");
        assert_eq!(back.to_string(), "9f2c");
    }
}
