//! CLI command implementations for Riftline.

pub(crate) mod play;
pub(crate) mod records;
pub(crate) mod sim;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `sim` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<riftline::sim::SimError> for CliError {
    fn from(e: riftline::sim::SimError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<riftline::game::SessionError> for CliError {
    fn from(e: riftline::game::SessionError) -> Self {
        Self::new(e.to_string())
    }
}

/// Derive a seed from the system clock.
// Truncating the nanosecond count keeps the low, fast-moving bits.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
