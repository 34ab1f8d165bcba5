//! Pit-stop detection.

use tracing::{debug, info};

use crate::types::{OpenPitStop, PitStopRecord, TelemetrySample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PitState {
    #[default]
    OutOfPit,
    InPit,
}

/// Two-state machine driven by the on-pit-road flag.
///
/// Entry captures the open stop; exit completes it and emits the record.
/// Ticks where the flag is unchanged are no-ops in either state.
#[derive(Debug, Default)]
pub struct PitDetector {
    state: PitState,
    open: Option<OpenPitStop>,
    stop_counter: u32,
}

impl PitDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one decoded sample. Returns a completed record at pit exit.
    pub fn on_sample(&mut self, sample: &TelemetrySample) -> Option<PitStopRecord> {
        match (self.state, sample.on_pit_road) {
            (PitState::OutOfPit, true) => {
                self.state = PitState::InPit;
                self.stop_counter += 1;
                self.open = Some(OpenPitStop {
                    stop_number: self.stop_counter,
                    lap_number: sample.lap,
                    pit_in_time: sample.session_time,
                    fuel_before: sample.fuel_level,
                });
                debug!(stop = self.stop_counter, lap = sample.lap, "Pit entry");
                None
            }
            (PitState::InPit, false) => {
                self.state = PitState::OutOfPit;
                let record = self
                    .open
                    .take()
                    .map(|open| open.complete(sample.session_time, sample.fuel_level));
                if let Some(ref record) = record {
                    info!(
                        stop = record.stop_number,
                        duration = record.pit_duration,
                        fuel_added = record.fuel_added,
                        "Pit exit"
                    );
                }
                record
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
