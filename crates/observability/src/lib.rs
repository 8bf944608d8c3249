//! Tracing/logging setup shared by binaries and tests.

pub mod subscriber;

pub use subscriber::{LogFormat, LoggingConfig};

/// Initialize process-wide logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(&LoggingConfig::from_env());
}
