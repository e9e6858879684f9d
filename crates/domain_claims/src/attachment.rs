//! Supporting images and proof documents

use serde::{Deserialize, Serialize};

/// Fallback MIME type for files of unknown kind
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A binary file attached to the claim
///
/// Attachments live in memory only for the duration of the form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name as picked by the user
    pub file_name: String,
    /// MIME type
    pub content_type: String,
    /// File contents
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
