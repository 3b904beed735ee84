//! Structured logging using **tracing**.
//!
//! Diagnostics go to stderr as JSON so stdout carries only the report.

use tracing::{error, info, warn};

/// Initializes the global tracing subscriber.
///
/// Call this *once* at startup. Subsequent calls panic because the global
/// subscriber can only be set a single time.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=deadkw_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}
