//! Seller Portal Core Library
//!
//! This crate provides the wire models, error types, configuration, and form
//! validation rules shared by every seller-portal component.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

mod serde_helpers;

// Re-export commonly used types
pub use config::{PortalConfig, DEFAULT_MAX_UPLOAD_MB};
pub use error::{ErrorMetadata, LogLevel, PortalError};
pub use validation::FieldErrors;
