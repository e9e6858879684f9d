//! Controller policies
//!
//! Product decisions the observed form leaves open are expressed here as
//! configuration rather than hard-coded behaviour.

use serde::{Deserialize, Serialize};

/// What to do with an edit for an identifier that is not in the field table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Drop the edit and log it
    Ignore,
    /// Fail the edit with `ClaimError::UnrecognizedField`
    #[default]
    Reject,
}

/// Policy knobs for one `ClaimFormController`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionPolicy {
    pub unknown_fields: UnknownFieldPolicy,
    /// Refuse draft edits while a request is in flight
    pub lock_edits_while_submitting: bool,
    /// Clear the draft after the server accepts a claim
    pub reset_after_success: bool,
    /// Run `DraftValidator` after confirmation and skip the request if it fails
    pub validate_before_submit: bool,
}

impl SubmissionPolicy {
    /// Behaviour of the original web form: unknown ids ignored, nothing locked,
    /// nothing reset, no client-side validation
    pub fn permissive() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..Self::default()
        }
    }

    /// Strictest settings
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            lock_edits_while_submitting: true,
            reset_after_success: true,
            validate_before_submit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_unknown_fields_only() {
        let policy = SubmissionPolicy::default();
        assert_eq!(policy.unknown_fields, UnknownFieldPolicy::Reject);
        assert!(!policy.lock_edits_while_submitting);
        assert!(!policy.reset_after_success);
        assert!(!policy.validate_before_submit);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let policy: SubmissionPolicy =
            serde_json::from_str(r#"{"unknown_fields":"ignore","reset_after_success":true}"#).unwrap();
        assert_eq!(policy.unknown_fields, UnknownFieldPolicy::Ignore);
        assert!(policy.reset_after_success);
        assert!(!policy.validate_before_submit);
    }
}
