//! Per-slot errors
//!
//! Everything that can go wrong with one document slot. None of these abort the
//! form: the coordinator records them against the slot and the rest of the form
//! stays editable.

use portal_core::{ErrorMetadata, LogLevel, PortalError};

use crate::slots::{size_limit_message, SlotKind};
use crate::validator::ValidationError;

/// A stored payload could not be turned into a preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeWarning {
    #[error("payload is empty")]
    Empty,

    #[error("payload is not valid Base64: {0}")]
    InvalidBase64(String),

    #[error("payload is a remote URL and has no inline content")]
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Unsupported file type {content_type} for {kind:?} slot")]
    UnsupportedType { content_type: String, kind: SlotKind },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("File read failed: {0}")]
    ReadError(String),

    #[error("Preview unavailable: {0}")]
    DecodeWarning(#[from] DecodeWarning),

    #[error("Unknown document slot: {0}")]
    UnknownSlot(String),
}

impl From<ValidationError> for SlotError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedType {
                content_type, kind, ..
            } => SlotError::UnsupportedType { content_type, kind },
            ValidationError::TooLarge { size, max } => SlotError::TooLarge { size, max },
        }
    }
}

impl From<std::io::Error> for SlotError {
    fn from(err: std::io::Error) -> Self {
        SlotError::ReadError(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, sensitive, log_level).
fn slot_error_static_metadata(
    err: &SlotError,
) -> (&'static str, bool, Option<&'static str>, bool, LogLevel) {
    match err {
        SlotError::UnsupportedType { .. } => (
            "UNSUPPORTED_TYPE",
            false,
            Some("Choose a file of an accepted type"),
            false,
            LogLevel::Debug,
        ),
        SlotError::TooLarge { .. } => (
            "FILE_TOO_LARGE",
            false,
            Some("Choose a smaller file"),
            false,
            LogLevel::Debug,
        ),
        SlotError::ReadError(_) => (
            "READ_ERROR",
            false,
            Some("Select the file again"),
            true,
            LogLevel::Warn,
        ),
        SlotError::DecodeWarning(_) => (
            "DECODE_WARNING",
            false,
            Some("Upload the document again"),
            false,
            LogLevel::Warn,
        ),
        SlotError::UnknownSlot(_) => (
            "UNKNOWN_SLOT",
            false,
            None,
            false,
            LogLevel::Error,
        ),
    }
}

impl SlotError {
    /// Whether this is the non-fatal "no preview" case rather than a refused file.
    pub fn is_warning(&self) -> bool {
        matches!(self, SlotError::DecodeWarning(_))
    }
}

impl ErrorMetadata for SlotError {
    fn error_code(&self) -> &'static str {
        slot_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        slot_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        slot_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        slot_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        slot_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            SlotError::UnsupportedType { kind, .. } => kind.unsupported_type_message().to_string(),
            SlotError::TooLarge { max, .. } => size_limit_message(*max),
            SlotError::ReadError(_) => "Failed to read file.".to_string(),
            SlotError::DecodeWarning(_) => {
                "Failed to display file preview. Please re-upload.".to_string()
            }
            SlotError::UnknownSlot(name) => format!("Unknown document field: {}", name),
        }
    }
}

impl From<SlotError> for PortalError {
    fn from(err: SlotError) -> Self {
        let message = err.client_message();
        match err {
            SlotError::TooLarge { .. } => PortalError::PayloadTooLarge(message),
            SlotError::UnknownSlot(_) => PortalError::NotFound(message),
            SlotError::ReadError(ref detail) => PortalError::Internal(detail.clone()),
            _ => PortalError::InvalidInput(message),
        }
    }
}
