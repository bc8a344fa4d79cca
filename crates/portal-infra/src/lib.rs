//! Seller Portal Infrastructure Library
//!
//! Shared pieces for the portal binaries:
//! - Telemetry initialization (tracing subscriber)
//! - Error reports for terminal and JSON output

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, DEFAULT_LOG_FILTER};

pub use error::{log_error, ErrorReport};
