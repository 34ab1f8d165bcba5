//! Replay source backed by a JSON-lines recording.
//!
//! Each line of a recording is one tick: an optional session document (in
//! the same shape as the live YAML, as JSON) and an optional value map.
//! A line with neither reads as a gap in source availability, which the
//! monitor reports as a disconnect. Once a session document has been seen
//! it stays current for subsequent ticks until replaced, matching how the
//! live provider keeps serving the last session description.

use std::collections::VecDeque;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PitwireError, Result};
use crate::schema::SessionDocument;
use crate::source::TelemetrySource;
use crate::types::RawSample;

/// One recorded tick.
#[derive(Debug, Clone, Default, Deserialize)]
struct TickRecord {
    #[serde(default)]
    session: Option<SessionDocument>,
    #[serde(default)]
    values: Option<RawSample>,
}

/// Plays a recording back through the source interface, one tick per poll.
#[derive(Debug)]
pub struct ReplaySource {
    ticks: VecDeque<TickRecord>,
    current: TickRecord,
    session: Option<SessionDocument>,
    exhausted: bool,
}

impl ReplaySource {
    /// Open a JSON-lines recording file.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PitwireError::recording_error(path.to_path_buf(), e))?;

        let source = Self::from_script(&contents)?;
        info!(path = %path.display(), ticks = source.ticks.len(), "Opened recording");
        Ok(source)
    }

    /// Parse a recording from its raw JSON-lines text.
    pub fn from_script(script: &str) -> Result<Self> {
        let mut ticks = VecDeque::new();

        for (index, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: TickRecord = serde_json::from_str(line).map_err(|e| {
                PitwireError::parse_error(format!("recording line {}", index + 1), e.to_string())
            })?;
            ticks.push_back(record);
        }

        Ok(Self { ticks, current: TickRecord::default(), session: None, exhausted: false })
    }

    /// Remaining unplayed ticks.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }

    fn advance(&mut self) {
        match self.ticks.pop_front() {
            Some(record) => {
                if let Some(doc) = &record.session {
                    self.session = Some(doc.clone());
                }
                // A tick with no values also drops the session for that
                // tick, so recordings can script a full disconnect.
                if record.values.is_none() && record.session.is_none() {
                    self.session = None;
                }
                self.current = record;
            }
            None => {
                if !self.exhausted {
                    debug!("Reached end of recording");
                    self.exhausted = true;
                }
                self.current = TickRecord::default();
                self.session = None;
            }
        }
    }
}

#[async_trait::async_trait]
impl TelemetrySource for ReplaySource {
    async fn session_document(&mut self) -> Result<Option<SessionDocument>> {
        // The monitor reads the session first each tick; that read paces
        // the replay forward by one record.
        self.advance();
        Ok(self.session.clone())
    }

    async fn sample(&mut self) -> Result<Option<RawSample>> {
        Ok(self.current.values.clone())
    }
}
