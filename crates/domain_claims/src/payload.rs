//! Multipart payload construction
//!
//! The payload is a transport-neutral, ordered list of form entries. Adapters
//! turn it into their own multipart body; the domain never sets a content type
//! or boundary.

use crate::attachment::Attachment;
use crate::draft::ClaimDraft;
use crate::field::FieldId;

/// Repeatable key shared by every attached file
pub const FILES_KEY: &str = "files";

/// Key of the declaration flag
pub const DECLARATION_KEY: &str = "declaration";

/// One entry of the multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadEntry {
    Text { key: &'static str, value: String },
    File { key: &'static str, attachment: Attachment },
}

impl PayloadEntry {
    pub fn key(&self) -> &'static str {
        match self {
            PayloadEntry::Text { key, .. } | PayloadEntry::File { key, .. } => key,
        }
    }
}

/// The serialized draft, ready for one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPayload {
    entries: Vec<PayloadEntry>,
}

impl ClaimPayload {
    /// Snapshots the draft into payload entries
    ///
    /// Text fields come first in form order, then the declaration rendered as
    /// `"true"`/`"false"`, then one `files` entry per attachment in upload order.
    pub fn from_draft(draft: &ClaimDraft) -> Self {
        let mut entries = Vec::with_capacity(FieldId::ALL.len() + 1 + draft.attachments.len());

        for field in FieldId::ALL {
            entries.push(PayloadEntry::Text {
                key: field.payload_key(),
                value: draft.text(field).to_string(),
            });
        }

        entries.push(PayloadEntry::Text {
            key: DECLARATION_KEY,
            value: draft.declaration_accepted.to_string(),
        });

        entries.extend(draft.attachments.iter().cloned().map(|attachment| PayloadEntry::File {
            key: FILES_KEY,
            attachment,
        }));

        Self { entries }
    }

    pub fn entries(&self) -> &[PayloadEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PayloadEntry> {
        self.entries
    }

    /// Returns the value of a text entry by key
    pub fn text(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            PayloadEntry::Text { key: k, value } if *k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn text_entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            PayloadEntry::Text { key, value } => Some((*key, value.as_str())),
            PayloadEntry::File { .. } => None,
        })
    }

    pub fn file_entries(&self) -> impl Iterator<Item = &Attachment> {
        self.entries.iter().filter_map(|entry| match entry {
            PayloadEntry::File { attachment, .. } => Some(attachment),
            PayloadEntry::Text { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&ClaimDraft> for ClaimPayload {
    fn from(draft: &ClaimDraft) -> Self {
        Self::from_draft(draft)
    }
}
