//! Loading supporting images from disk

use std::path::Path;

use tracing::debug;

use domain_claims::attachment::OCTET_STREAM;
use domain_claims::Attachment;

use crate::error::ClientError;

/// Guesses a content type from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        _ => OCTET_STREAM,
    }
}

/// Reads a file into an attachment named after its final path component
pub async fn load_attachment(path: impl AsRef<Path>) -> Result<Attachment, ClientError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %file_name, bytes = bytes.len(), "Loaded attachment");
    Ok(Attachment::new(file_name, content_type_for(path), bytes))
}

/// Loads every path, in the given order
pub async fn load_attachments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Attachment>, ClientError> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        attachments.push(load_attachment(path).await?);
    }
    Ok(attachments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for(Path::new("field.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("crop.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("report.pdf")), "application/pdf");
        assert_eq!(content_type_for(Path::new("notes")), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_load_attachment_reads_bytes() {
        let path: PathBuf = std::env::temp_dir().join(format!("claim-intake-{}.jpg", std::process::id()));
        tokio::fs::write(&path, [0xFF, 0xD8, 0xFF]).await.unwrap();

        let attachment = load_attachment(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(attachment.bytes, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(attachment.content_type, "image/jpeg");
        assert!(attachment.file_name.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_attachment("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
