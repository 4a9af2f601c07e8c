//! Collaborator boundary errors.
//!
//! Each external collaborator (document text extraction, structured
//! extraction, notification delivery) fails with one of these enums. Stages
//! flatten them into the record's error log; they never cross a stage
//! boundary as `Err`.

use thiserror::Error;

/// Document text extraction failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The referenced document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The file exists but is not a PDF.
    #[error("file is not a PDF: {0}")]
    NotAPdf(String),

    /// The document opened but contains no pages.
    #[error("document has no pages")]
    NoPages,

    /// No text layer could be extracted (scanned/image-based document).
    #[error("no text could be extracted from document; it may require OCR")]
    NoText,

    /// The document could not be parsed at all.
    #[error("invalid or corrupt document: {0}")]
    Corrupt(String),
}

/// Structured invoice extraction failure (model inference boundary).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}

impl ExtractionError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::ExtractionFailed(msg.into())
    }
}

/// Notification delivery failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The transport is missing credentials or a recipient.
    #[error("notification not configured: {0}")]
    Unconfigured(String),

    /// The transport rejected our credentials.
    #[error("notification authentication failed: {0}")]
    AuthFailed(String),

    /// The message was handed to the transport but delivery failed.
    #[error("notification transport failed: {0}")]
    TransportFailed(String),
}

impl NotificationError {
    pub fn unconfigured(msg: impl Into<String>) -> Self {
        Self::Unconfigured(msg.into())
    }

    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthFailed(msg.into())
    }

    pub fn transport_failed(msg: impl Into<String>) -> Self {
        Self::TransportFailed(msg.into())
    }
}
