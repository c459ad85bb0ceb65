//! Email attachments
//!
//! An attachment carries either its content in memory or a path to read it
//! from, plus an optional explicit content type. When no content type is
//! given, one is inferred from the filename extension.

use std::path::PathBuf;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::MailError;

/// Content type used when inference finds no match
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Fixed extension lookup used by content-type inference
static MIME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "pdf" => "application/pdf",
    "doc" => "application/msword",
    "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "xls" => "application/vnd.ms-excel",
    "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "txt" => "text/plain",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "zip" => "application/zip",
    "rar" => "application/x-rar-compressed",
};

/// A file attached to an outgoing email
///
/// # Examples
///
/// ```rust
/// use maildrop::Attachment;
///
/// let report = Attachment::from_content("report.pdf", b"%PDF-1.4".to_vec());
/// assert_eq!(report.resolve_content_type(), "application/pdf");
///
/// let logo = Attachment::from_path("logo.bin", "/var/data/logo.bin")
///     .content_type("image/png");
/// assert_eq!(logo.resolve_content_type(), "image/png");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    /// Filename shown to the recipient
    pub filename: String,

    /// Attachment bytes, if held in memory
    pub content: Option<Vec<u8>>,

    /// Path to read the bytes from, if not held in memory
    pub source_path: Option<PathBuf>,

    /// Explicit content type; overrides inference when set
    pub content_type: Option<String>,
}

impl Attachment {
    /// Create an attachment from in-memory content
    pub fn from_content<N, C>(filename: N, content: C) -> Self
    where
        N: Into<String>,
        C: Into<Vec<u8>>,
    {
        Self {
            filename: filename.into(),
            content: Some(content.into()),
            source_path: None,
            content_type: None,
        }
    }

    /// Create an attachment read from a file at dispatch time
    pub fn from_path<N, P>(filename: N, path: P) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            filename: filename.into(),
            content: None,
            source_path: Some(path.into()),
            content_type: None,
        }
    }

    /// Set an explicit content type, overriding inference
    #[must_use]
    pub fn content_type<T: Into<String>>(mut self, content_type: T) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Validate the attachment
    ///
    /// The filename must be non-empty and either content or a non-empty
    /// source path must be present.
    ///
    /// # Errors
    ///
    /// Returns `MailError::InvalidAttachment` naming the failing condition
    pub fn validate(&self) -> Result<(), MailError> {
        if self.filename.trim().is_empty() {
            return Err(MailError::attachment("filename must not be empty"));
        }

        if self.content.is_none() && self.source_path.is_none() {
            return Err(MailError::attachment(format!(
                "{}: neither content nor a source path was provided",
                self.filename
            )));
        }

        if let Some(path) = &self.source_path {
            if path.as_os_str().is_empty() {
                return Err(MailError::attachment(format!(
                    "{}: source path must not be empty",
                    self.filename
                )));
            }
        }

        Ok(())
    }

    /// Resolve the content type of the attachment
    ///
    /// Returns the explicit content type if one was set; otherwise infers
    /// one from the lowercased filename extension (the text after the last
    /// `.`). Unknown or missing extensions resolve to
    /// `application/octet-stream`.
    #[must_use]
    pub fn resolve_content_type(&self) -> &str {
        if let Some(content_type) = &self.content_type {
            return content_type;
        }

        let extension = self
            .filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        MIME_TYPES
            .get(extension.as_str())
            .copied()
            .unwrap_or(OCTET_STREAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_with_content_is_valid() {
        let attachment = Attachment::from_content("report.pdf", b"content".to_vec());
        assert!(attachment.validate().is_ok());
    }

    #[test]
    fn test_attachment_with_path_is_valid() {
        let attachment = Attachment::from_path("report.pdf", "/tmp/report.pdf");
        assert!(attachment.validate().is_ok());
    }

    #[test]
    fn test_empty_filename_is_invalid() {
        let attachment = Attachment::from_content("", b"content".to_vec());
        assert!(matches!(
            attachment.validate(),
            Err(MailError::InvalidAttachment(_))
        ));
    }

    #[test]
    fn test_whitespace_filename_is_invalid() {
        let attachment = Attachment::from_content("   ", b"content".to_vec());
        assert!(attachment.validate().is_err());
    }

    #[test]
    fn test_missing_content_and_path_is_invalid() {
        let attachment = Attachment {
            filename: "report.pdf".to_string(),
            ..Attachment::default()
        };
        assert!(matches!(
            attachment.validate(),
            Err(MailError::InvalidAttachment(_))
        ));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let attachment = Attachment::from_path("report.pdf", "");
        assert!(matches!(
            attachment.validate(),
            Err(MailError::InvalidAttachment(_))
        ));
    }

    #[test]
    fn test_infers_pdf() {
        let attachment = Attachment::from_content("report.pdf", b"x".to_vec());
        assert_eq!(attachment.resolve_content_type(), "application/pdf");
    }

    #[test]
    fn test_inference_is_case_insensitive() {
        let attachment = Attachment::from_content("photo.JPG", b"x".to_vec());
        assert_eq!(attachment.resolve_content_type(), "image/jpeg");
    }

    #[test]
    fn test_infers_office_types() {
        let attachment = Attachment::from_content("sheet.xlsx", b"x".to_vec());
        assert_eq!(
            attachment.resolve_content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_unknown_extension_defaults_to_octet_stream() {
        let attachment = Attachment::from_content("data.unknownext", b"x".to_vec());
        assert_eq!(attachment.resolve_content_type(), OCTET_STREAM);
    }

    #[test]
    fn test_missing_extension_defaults_to_octet_stream() {
        let attachment = Attachment::from_content("README", b"x".to_vec());
        assert_eq!(attachment.resolve_content_type(), OCTET_STREAM);
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let attachment =
            Attachment::from_content("report.pdf", b"x".to_vec()).content_type("text/csv");
        assert_eq!(attachment.resolve_content_type(), "text/csv");
    }
}
