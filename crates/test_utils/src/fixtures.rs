//! Pre-built Test Fixtures
//!
//! Provides ready-to-use drafts and attachments. Values are consistent and
//! predictable so tests can assert on them directly.

use domain_claims::{Attachment, ClaimDraft, FieldId};

/// Smallest byte sequence recognised as a PNG signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG start-of-image marker
pub const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Fixture for claim drafts
pub struct DraftFixtures;

impl DraftFixtures {
    /// Field values of a complete claim, in form order
    pub fn form_values() -> Vec<(FieldId, &'static str)> {
        vec![
            (FieldId::Name, "Ravi Kumar"),
            (FieldId::Aadhaar, "1234-5678-9012"),
            (FieldId::Phone, "+91 9876543210"),
            (FieldId::Email, "ravi.kumar@example.com"),
            (FieldId::FarmLocation, "28.6139, 77.2090"),
            (FieldId::FarmSize, "2.5"),
            (FieldId::CropType, "Wheat"),
            (FieldId::DamageDescription, "Standing crop flattened and waterlogged after heavy rain"),
            (FieldId::DateFrom, "2024-07-01"),
            (FieldId::DateTo, "2024-07-08"),
            (FieldId::RainfallRange, "7"),
        ]
    }

    /// Every field filled, declaration accepted, two photos attached
    pub fn complete() -> ClaimDraft {
        let mut draft = Self::complete_without_attachments();
        draft.replace_attachments(AttachmentFixtures::field_photos());
        draft
    }

    /// Every field filled and declaration accepted, nothing attached
    pub fn complete_without_attachments() -> ClaimDraft {
        let mut draft = ClaimDraft::new();
        for (field, value) in Self::form_values() {
            draft.set_text(field, value);
        }
        draft.declaration_accepted = true;
        draft
    }

    /// Required fields only
    pub fn minimal() -> ClaimDraft {
        let mut draft = ClaimDraft::new();
        for (field, value) in Self::form_values() {
            if field.is_required() {
                draft.set_text(field, value);
            }
        }
        draft
    }
}

/// Fixture for attachments
pub struct AttachmentFixtures;

impl AttachmentFixtures {
    /// A PNG-looking attachment whose body ends with `marker`
    pub fn png(name: &str, marker: u8) -> Attachment {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.push(marker);
        Attachment::new(name, "image/png", bytes)
    }

    /// A JPEG-looking attachment whose body ends with `marker`
    pub fn jpeg(name: &str, marker: u8) -> Attachment {
        let mut bytes = JPEG_SIGNATURE.to_vec();
        bytes.push(marker);
        Attachment::new(name, "image/jpeg", bytes)
    }

    /// Two distinct field photos, in selection order
    pub fn field_photos() -> Vec<Attachment> {
        vec![Self::jpeg("north-field.jpg", 1), Self::png("south-field.png", 2)]
    }
}
