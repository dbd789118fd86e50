//! Tracing setup for the `postpack` binary.
//!
//! Logs go to stderr so CSV written to stdout stays clean.
//!
//! ```text
//! postpack --log-level debug browse     # per-file and per-post details
//! RUST_LOG=postpack=trace postpack      # RUST_LOG overrides --log-level
//! ```

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the filter: `RUST_LOG` if set and valid, otherwise `level`.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been set.
pub fn init_tracing(level: LogLevel) -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(matches!(level, LogLevel::Debug | LogLevel::Trace))
        .compact()
        .try_init()
}
