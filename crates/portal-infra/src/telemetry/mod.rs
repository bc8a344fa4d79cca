//! Tracing initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt layer,
//! human-readable or JSON.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, DEFAULT_LOG_FILTER};
