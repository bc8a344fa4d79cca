//! Error reports
//!
//! Turns any error carrying [`ErrorMetadata`] into the shape printed by the CLI,
//! and logs it at the level the error asks for.

use portal_core::{ErrorMetadata, LogLevel};
use serde::Serialize;

/// Standard error output format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<&'static str>,
}

impl ErrorReport {
    /// `verbose` adds the internal message unless the error is marked sensitive.
    pub fn from_error<E>(err: &E, verbose: bool) -> Self
    where
        E: ErrorMetadata + std::fmt::Display,
    {
        Self {
            error: err.client_message(),
            code: err.error_code(),
            details: (verbose && !err.is_sensitive()).then(|| err.to_string()),
            suggested_action: err.suggested_action(),
        }
    }
}

/// Log an error at its own level.
pub fn log_error<E>(err: &E)
where
    E: ErrorMetadata + std::fmt::Display,
{
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code = err.error_code(), error = %err, "Request failed"),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), error = %err, "Request failed"),
        LogLevel::Error => tracing::error!(code = err.error_code(), error = %err, "Request failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::PortalError;

    #[test]
    fn test_report_uses_client_message() {
        let err = PortalError::Unauthorized("token expired".into());
        let report = ErrorReport::from_error(&err, false);
        assert_eq!(
            report.error,
            "Session expired or unauthorized. Please log in again."
        );
        assert_eq!(report.code, "SESSION_EXPIRED");
        assert!(report.details.is_none());
    }

    #[test]
    fn test_verbose_report_hides_sensitive_details() {
        let err = PortalError::Transport("dns error: api.internal".into());
        let report = ErrorReport::from_error(&err, true);
        assert!(report.details.is_none());

        let err = PortalError::NotFound("Ticket not found".into());
        let report = ErrorReport::from_error(&err, true);
        assert_eq!(report.details.as_deref(), Some("Not found: Ticket not found"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["code"], "NOT_FOUND");
        assert!(value.get("suggestedAction").is_some());
    }
}
