//! Draft validation rules
//!
//! Validation is advisory: the form never blocks editing, and submission is
//! only gated on it when `SubmissionPolicy::validate_before_submit` is set.
//!
//! # Validation Rules
//!
//! ## Errors
//! - Fields the claims server requires must not be blank
//! - Farm location must read as `"lat, lon"` within valid ranges
//! - Incident dates must be `YYYY-MM-DD`
//! - Farm size, if given, must be a positive decimal
//! - Rainfall duration, if given, must be a non-negative whole number of days
//! - Email, if given, must be a valid address
//!
//! ## Warnings
//! - Incident end date before start date
//! - Declaration not accepted
//! - No supporting images attached

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use core_kernel::{parse_form_date, GeoPoint, IncidentPeriod};

use crate::draft::ClaimDraft;
use crate::field::FieldId;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field the finding is about, if it concerns one field
    pub field: Option<FieldId>,
    pub message: String,
}

/// Result of draft validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the draft is valid
    pub is_valid: bool,
    /// Problems that would make the server reject the claim
    pub errors: Vec<ValidationIssue>,
    /// Non-fatal issues
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, field: Option<FieldId>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field,
            message: message.into(),
        });
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, field: Option<FieldId>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    /// Returns true if any error concerns the given field
    pub fn has_error_for(&self, field: FieldId) -> bool {
        self.errors.iter().any(|issue| issue.field == Some(field))
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for claim drafts
pub struct DraftValidator;

impl DraftValidator {
    /// Validates the whole draft
    pub fn validate(draft: &ClaimDraft) -> ValidationReport {
        let mut report = ValidationReport::ok();

        Self::validate_required(draft, &mut report);
        Self::validate_location(draft, &mut report);
        Self::validate_dates(draft, &mut report);
        Self::validate_farm_size(draft, &mut report);
        Self::validate_rainfall(draft, &mut report);
        Self::validate_email(draft, &mut report);

        if !draft.declaration_accepted {
            report.add_warning(None, "Declaration has not been accepted");
        }
        if draft.attachments.is_empty() {
            report.add_warning(None, "No supporting images attached");
        }

        report
    }

    fn validate_required(draft: &ClaimDraft, report: &mut ValidationReport) {
        for field in FieldId::ALL.into_iter().filter(|f| f.is_required()) {
            if draft.text(field).trim().is_empty() {
                report.add_error(Some(field), format!("{} is required", field.label()));
            }
        }
    }

    fn validate_location(draft: &ClaimDraft, report: &mut ValidationReport) {
        let value = draft.farm_location.trim();
        if value.is_empty() {
            return;
        }
        if let Err(e) = GeoPoint::from_str(value) {
            report.add_error(Some(FieldId::FarmLocation), e.to_string());
        }
    }

    fn validate_dates(draft: &ClaimDraft, report: &mut ValidationReport) {
        let mut parsed = true;
        for field in [FieldId::DateFrom, FieldId::DateTo] {
            let value = draft.text(field);
            if value.trim().is_empty() {
                parsed = false;
                continue;
            }
            if let Err(e) = parse_form_date(value) {
                report.add_error(Some(field), e.to_string());
                parsed = false;
            }
        }

        if parsed {
            if let Ok(period) = IncidentPeriod::parse(&draft.date_from, &draft.date_to) {
                if !period.is_ordered() {
                    report.add_warning(
                        Some(FieldId::DateTo),
                        "Incident end date is before the start date",
                    );
                }
            }
        }
    }

    fn validate_farm_size(draft: &ClaimDraft, report: &mut ValidationReport) {
        let value = draft.farm_size.trim();
        if value.is_empty() {
            return;
        }
        match Decimal::from_str(value) {
            Ok(size) if size > Decimal::ZERO => {}
            Ok(_) => report.add_error(Some(FieldId::FarmSize), "Farm area must be positive"),
            Err(_) => report.add_error(
                Some(FieldId::FarmSize),
                format!("Farm area '{value}' is not a number"),
            ),
        }
    }

    fn validate_rainfall(draft: &ClaimDraft, report: &mut ValidationReport) {
        let value = draft.rainfall_range_days.trim();
        if value.is_empty() {
            return;
        }
        if value.parse::<u32>().is_err() {
            report.add_error(
                Some(FieldId::RainfallRange),
                format!("Rainfall duration '{value}' must be a whole number of days"),
            );
        }
    }

    fn validate_email(draft: &ClaimDraft, report: &mut ValidationReport) {
        let value = draft.email.trim();
        if value.is_empty() {
            return;
        }
        if !value.validate_email() {
            report.add_error(Some(FieldId::Email), format!("'{value}' is not a valid email address"));
        }
    }
}
