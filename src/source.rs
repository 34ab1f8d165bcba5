//! Telemetry source trait.

use crate::Result;
use crate::schema::SessionDocument;
use crate::types::RawSample;

/// Trait for raw telemetry data sources.
///
/// Sources abstract over the native shared-memory provider and recorded
/// replays. Both accessors may return `Ok(None)` or an error to indicate
/// unavailability; the connection monitor treats either as a disconnect
/// and never propagates it further. Reads are expected to return promptly
/// or fail fast — never block past one polling period.
#[async_trait::async_trait]
pub trait TelemetrySource: Send + 'static {
    /// The current session-description document, if one is available.
    async fn session_document(&mut self) -> Result<Option<SessionDocument>>;

    /// The telemetry sample for the current tick, if one is available.
    async fn sample(&mut self) -> Result<Option<RawSample>>;
}
