//! Lap completion detection.

use tracing::{debug, info};

use crate::types::{LapRecord, TelemetrySample};

/// Scoring-invalid bit of SessionFlags.
const FLAG_LAP_INVALID: u32 = 0x0000_0001;

/// Emits a lap record each time the lap-completed counter advances.
///
/// Fuel usage is the delta between the tracked level at the previous lap
/// boundary and the current level, clamped to zero. The 0→1 transition at
/// race start never emits: it carries no prior-lap fuel baseline and only
/// primes the trackers.
#[derive(Debug, Default)]
pub struct LapDetector {
    last_lap_number: i32,
    last_fuel_level: f64,
}

impl LapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one decoded sample. Returns a record when a lap beyond the
    /// first completed one finishes.
    pub fn on_sample(&mut self, sample: &TelemetrySample) -> Option<LapRecord> {
        // Prime the fuel baseline on the first tick that reports fuel,
        // before any lap logic runs against it.
        if self.last_fuel_level == 0.0 && sample.fuel_level > 0.0 {
            self.last_fuel_level = sample.fuel_level;
            debug!(fuel = self.last_fuel_level, "Initial fuel level");
        }

        let mut record = None;

        if sample.lap_completed > self.last_lap_number && self.last_lap_number > 0 {
            let fuel_used = (self.last_fuel_level - sample.fuel_level).max(0.0);

            let lap = LapRecord {
                lap_number: sample.lap_completed,
                lap_time: sample.lap_last_time,
                session_time: sample.session_time,
                fuel_at_start: self.last_fuel_level,
                fuel_at_end: sample.fuel_level,
                fuel_used,
                position: sample.position,
                class_position: sample.class_position,
                is_valid: sample.session_flags & FLAG_LAP_INVALID == 0,
                is_best_lap: sample.lap_last_time == sample.lap_best_time,
            };

            info!(
                lap = lap.lap_number,
                time = lap.lap_time,
                fuel_used = lap.fuel_used,
                "Lap completed"
            );
            record = Some(lap);
        }

        // Trackers advance even when the race-start guard suppressed the
        // event, so the first completed lap primes them silently.
        if sample.lap_completed > self.last_lap_number {
            self.last_lap_number = sample.lap_completed;
            self.last_fuel_level = sample.fuel_level;
        }

        record
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
