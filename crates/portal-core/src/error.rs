//! Error types module
//!
//! This module provides the core error type used by the seller portal client.
//! All backend, transport, and input failures are unified under the `PortalError`
//! enum. Per-slot document errors live in `portal-documents` and implement the same
//! [`ErrorMetadata`] trait so both can be surfaced the same way.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a preview that could not be built
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for user-facing errors - defines how an error should be presented
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "SESSION_EXPIRED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried as-is)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from the user
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        PortalError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for PortalError {
    fn from(err: io::Error) -> Self {
        PortalError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::InvalidResponse(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for PortalError {
    fn from(err: validator::ValidationErrors) -> Self {
        PortalError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn portal_error_static_metadata(
    err: &PortalError,
) -> (&'static str, bool, Option<&'static str>, bool, LogLevel) {
    match err {
        PortalError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Correct the highlighted fields and try again"),
            false,
            LogLevel::Debug,
        ),
        PortalError::BadRequest(_) => (
            "BAD_REQUEST",
            false,
            Some("Check the submitted values"),
            false,
            LogLevel::Debug,
        ),
        PortalError::Unauthorized(_) => (
            "SESSION_EXPIRED",
            false,
            Some("Log in again"),
            false,
            LogLevel::Debug,
        ),
        PortalError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Refresh the list and try again"),
            false,
            LogLevel::Debug,
        ),
        PortalError::PayloadTooLarge(_) => (
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Choose a smaller file"),
            false,
            LogLevel::Debug,
        ),
        PortalError::Backend { .. } => (
            "BACKEND_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
        PortalError::Transport(_) => (
            "NETWORK_ERROR",
            true,
            Some("Check your connection and retry"),
            true,
            LogLevel::Warn,
        ),
        PortalError::InvalidResponse(_) => (
            "INVALID_RESPONSE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        PortalError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check PORTAL_* environment variables"),
            false,
            LogLevel::Error,
        ),
        PortalError::Internal(_) | PortalError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl PortalError {
    /// The caller's session token is no longer usable and should be dropped.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, PortalError::Unauthorized(_))
    }
}

impl ErrorMetadata for PortalError {
    fn error_code(&self) -> &'static str {
        portal_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        portal_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        portal_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        portal_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        portal_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            PortalError::InvalidInput(ref msg) => msg.clone(),
            PortalError::BadRequest(ref msg) => msg.clone(),
            PortalError::Unauthorized(_) => {
                "Session expired or unauthorized. Please log in again.".to_string()
            }
            PortalError::NotFound(ref msg) => msg.clone(),
            PortalError::PayloadTooLarge(ref msg) => msg.clone(),
            PortalError::Backend { ref message, .. } => message.clone(),
            PortalError::Transport(_) => "Could not reach the server".to_string(),
            PortalError::InvalidResponse(_) => {
                "Invalid data structure received from backend.".to_string()
            }
            PortalError::Config(ref msg) => msg.clone(),
            PortalError::Internal(_) | PortalError::InternalWithSource { .. } => {
                "An unexpected error occurred.".to_string()
            }
        }
    }
}
