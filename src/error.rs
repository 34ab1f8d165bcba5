//! Error types for the event-derivation service.
//!
//! Faults are classified the way the monitor consumes them: source
//! unavailability is retryable and downgraded to a disconnect, malformed
//! data defaults at the parse site, and only initialization faults are
//! allowed to terminate the process.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pitwire operations.
pub type Result<T, E = PitwireError> = std::result::Result<T, E>;

/// Main error type for telemetry ingestion and broadcasting.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PitwireError {
    #[error("Telemetry source unavailable: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Recording file error: {path}")]
    Recording {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Transport error: {reason}")]
    Transport {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid configuration: {details}")]
    Config { details: String },
}

impl PitwireError {
    /// Returns whether the monitor should treat this as a transient
    /// disconnect rather than a hard failure.
    pub fn is_disconnect(&self) -> bool {
        match self {
            PitwireError::Source { .. } => true,
            PitwireError::Recording { .. } => false,
            PitwireError::Parse { .. } => true,
            PitwireError::Transport { .. } => false,
            PitwireError::Config { .. } => false,
        }
    }

    /// Helper constructor for source unavailability.
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        PitwireError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for parse failures with context.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        PitwireError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for recording file errors with path context.
    pub fn recording_error(path: PathBuf, source: std::io::Error) -> Self {
        PitwireError::Recording { path, source }
    }

    /// Helper constructor for transport failures.
    pub fn transport_error(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PitwireError::Transport { reason: reason.into(), source: Some(source) }
    }
}

impl From<std::io::Error> for PitwireError {
    fn from(err: std::io::Error) -> Self {
        PitwireError::Recording { path: PathBuf::from("<unknown>"), source: err }
    }
}
