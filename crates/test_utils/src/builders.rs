//! Test Data Builders
//!
//! Builders let tests set only the fields they care about and take defaults
//! for everything else.

use chrono::{Duration, NaiveDate};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

use domain_claims::{Attachment, ClaimDraft, FieldId};

use crate::fixtures::{AttachmentFixtures, DraftFixtures};

const CROPS: [&str; 6] = ["Wheat", "Paddy", "Cotton", "Sugarcane", "Maize", "Mustard"];

/// Builder for claim drafts
#[derive(Debug, Clone)]
pub struct ClaimDraftBuilder {
    draft: ClaimDraft,
}

impl Default for ClaimDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDraftBuilder {
    /// Starts from a complete draft with photos
    pub fn new() -> Self {
        Self {
            draft: DraftFixtures::complete(),
        }
    }

    /// Starts from an empty draft
    pub fn blank() -> Self {
        Self {
            draft: ClaimDraft::new(),
        }
    }

    /// Starts from a complete draft with generated values
    pub fn random() -> Self {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
            + Duration::days((0..120).fake::<i64>());
        let to = from + Duration::days((0..14).fake::<i64>());
        let latitude: f64 = (8.0..35.0).fake();
        let longitude: f64 = (68.0..97.0).fake();

        let mut draft = ClaimDraft::new();
        draft.set_text(FieldId::Name, Name().fake::<String>());
        draft.set_text(
            FieldId::Aadhaar,
            format!(
                "{:04}-{:04}-{:04}",
                (1000..10000).fake::<u16>(),
                (0..10000).fake::<u16>(),
                (0..10000).fake::<u16>()
            ),
        );
        draft.set_text(FieldId::Phone, format!("+91 {}", (6_000_000_000u64..10_000_000_000).fake::<u64>()));
        draft.set_text(FieldId::Email, SafeEmail().fake::<String>());
        draft.set_text(FieldId::FarmLocation, format!("{latitude:.4}, {longitude:.4}"));
        draft.set_text(FieldId::FarmSize, format!("{:.1}", (0.5..50.0).fake::<f64>()));
        draft.set_text(FieldId::CropType, CROPS[(0..CROPS.len()).fake::<usize>()]);
        draft.set_text(FieldId::DamageDescription, Sentence(4..12).fake::<String>());
        draft.set_text(FieldId::DateFrom, from.format("%Y-%m-%d").to_string());
        draft.set_text(FieldId::DateTo, to.format("%Y-%m-%d").to_string());
        draft.set_text(FieldId::RainfallRange, (to - from).num_days().to_string());
        draft.declaration_accepted = true;
        draft.replace_attachments(AttachmentFixtures::field_photos());

        Self { draft }
    }

    /// Sets one field
    pub fn with_field(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.draft.set_text(field, value);
        self
    }

    /// Clears one field
    pub fn without_field(self, field: FieldId) -> Self {
        self.with_field(field, "")
    }

    pub fn with_declaration(mut self, accepted: bool) -> Self {
        self.draft.declaration_accepted = accepted;
        self
    }

    /// Appends one attachment to the current selection
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.draft.attachments.push(attachment);
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.draft.replace_attachments(attachments);
        self
    }

    pub fn without_attachments(self) -> Self {
        self.with_attachments(Vec::new())
    }

    pub fn build(self) -> ClaimDraft {
        self.draft
    }
}
