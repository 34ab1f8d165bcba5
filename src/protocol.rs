//! Outbound subscriber protocol.
//!
//! Every message is a tagged envelope `{type, data}` serialized as one
//! complete JSON text per send. Payload field names are camelCase.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{PitwireError, Result};
use crate::types::{LapRecord, PitStopRecord, Session, TelemetrySample};

/// Full current-state message sent to a newly attached subscriber.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub is_connected: bool,
    pub session: Option<Session>,
    /// The 10 most recent lap records.
    pub laps: Vec<LapRecord>,
    /// The entire pit-stop history.
    pub pit_stops: Vec<PitStopRecord>,
}

/// One outbound envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    ConnectionStatus(Snapshot),
    IracingConnected { timestamp: String },
    IracingDisconnected { timestamp: String },
    SessionInfo(Session),
    Telemetry(TelemetrySample),
    LapCompleted(LapRecord),
    PitStop(PitStopRecord),
}

impl Event {
    /// Connection-established envelope stamped with the current time.
    pub fn connected_now() -> Self {
        Event::IracingConnected { timestamp: iso_timestamp() }
    }

    /// Connection-lost envelope stamped with the current time.
    pub fn disconnected_now() -> Self {
        Event::IracingDisconnected { timestamp: iso_timestamp() }
    }

    /// Serialize to one complete JSON text.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PitwireError::parse_error("event serialization", e.to_string())
        })
    }
}

fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
