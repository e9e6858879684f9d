//! Incident date handling
//!
//! Date inputs arrive as the text a browser date picker produces
//! (`YYYY-MM-DD`). This module parses them and models the damage period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format emitted by HTML date inputs and expected by the claims server
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors for temporal operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
    },

    #[error("Date is missing")]
    MissingDate,
}

/// Parses a date as entered in the claim form
pub fn parse_form_date(value: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TemporalError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT).map_err(|_| TemporalError::InvalidDate {
        value: value.to_string(),
    })
}

/// The period over which crop damage occurred
///
/// Ordering of `from` and `to` is expected but deliberately not enforced at
/// construction; callers that care use [`IncidentPeriod::is_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl IncidentPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Parses both ends of the period from form text
    pub fn parse(from: &str, to: &str) -> Result<Self, TemporalError> {
        Ok(Self {
            from: parse_form_date(from)?,
            to: parse_form_date(to)?,
        })
    }

    /// Returns true if the period does not run backwards
    pub fn is_ordered(&self) -> bool {
        self.to >= self.from
    }

    /// Inclusive length of the period in days, or `None` if it runs backwards
    pub fn days(&self) -> Option<i64> {
        self.is_ordered()
            .then(|| (self.to - self.from).num_days() + 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}
