//! The in-memory claim record

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::field::FieldId;

/// A claim as it is being filled in
///
/// Created empty, edited one field at a time, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDraft {
    /// Farmer's full name
    pub name: String,
    /// Aadhaar (national ID) number
    pub aadhaar_number: String,
    pub phone_number: String,
    /// Optional contact email
    pub email: String,
    /// Free-text geocoordinate, `"lat, lon"`
    pub farm_location: String,
    /// Free-text numeric area
    pub farm_size: String,
    pub crop_type: String,
    pub damage_description: String,
    /// Incident start, `YYYY-MM-DD`
    pub date_from: String,
    /// Incident end, `YYYY-MM-DD`
    pub date_to: String,
    /// Rainfall duration in days, as typed
    pub rainfall_range_days: String,
    /// Explicit affirmation that the information is accurate
    pub declaration_accepted: bool,
    /// Supporting images, in upload order
    pub attachments: Vec<Attachment>,
}

impl ClaimDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a text field
    pub fn text(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Aadhaar => &self.aadhaar_number,
            FieldId::Phone => &self.phone_number,
            FieldId::Email => &self.email,
            FieldId::FarmLocation => &self.farm_location,
            FieldId::FarmSize => &self.farm_size,
            FieldId::CropType => &self.crop_type,
            FieldId::DamageDescription => &self.damage_description,
            FieldId::DateFrom => &self.date_from,
            FieldId::DateTo => &self.date_to,
            FieldId::RainfallRange => &self.rainfall_range_days,
        }
    }

    /// Overwrites a text field; last write wins
    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Name => &mut self.name,
            FieldId::Aadhaar => &mut self.aadhaar_number,
            FieldId::Phone => &mut self.phone_number,
            FieldId::Email => &mut self.email,
            FieldId::FarmLocation => &mut self.farm_location,
            FieldId::FarmSize => &mut self.farm_size,
            FieldId::CropType => &mut self.crop_type,
            FieldId::DamageDescription => &mut self.damage_description,
            FieldId::DateFrom => &mut self.date_from,
            FieldId::DateTo => &mut self.date_to,
            FieldId::RainfallRange => &mut self.rainfall_range_days,
        };
        *slot = value.into();
    }

    /// Replaces the whole attachment set
    pub fn replace_attachments(&mut self, files: Vec<Attachment>) {
        self.attachments = files;
    }

    /// Flips the declaration and returns the new value
    pub fn toggle_declaration(&mut self) -> bool {
        self.declaration_accepted = !self.declaration_accepted;
        self.declaration_accepted
    }

    /// Restores the freshly created state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True if nothing has been entered yet
    pub fn is_blank(&self) -> bool {
        FieldId::ALL.iter().all(|f| self.text(*f).is_empty())
            && !self.declaration_accepted
            && self.attachments.is_empty()
    }

    /// Total size of all attachments in bytes
    pub fn attachment_bytes(&self) -> usize {
        self.attachments.iter().map(Attachment::len).sum()
    }
}
