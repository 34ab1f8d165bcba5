//! Raw sample maps and the decoded per-tick telemetry snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value::RawValue;

/// A flat mapping of telemetry field name to raw value, as handed over by
/// the data provider for one tick. Fields absent from the map decode to
/// their zero/false defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawSample {
    values: HashMap<String, RawValue>,
}

impl RawSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: RawValue) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> &RawValue {
        static MISSING: RawValue = RawValue::Missing;
        self.values.get(name).unwrap_or(&MISSING)
    }

    pub fn f64(&self, name: &str) -> f64 {
        self.get(name).as_f64()
    }

    pub fn i32(&self, name: &str) -> i32 {
        self.get(name).as_i32()
    }

    pub fn u32(&self, name: &str) -> u32 {
        self.get(name).as_u32()
    }

    pub fn bool(&self, name: &str) -> bool {
        self.get(name).as_bool()
    }
}

/// Decoded snapshot of the telemetry fields this service consumes,
/// produced once per poll tick and broadcast as the `telemetry` envelope.
///
/// Field names on the wire are camelCase to match the subscriber protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    // Timing
    pub session_time: f64,
    pub session_time_remain: f64,

    // Lap data
    pub lap: i32,
    pub lap_completed: i32,
    pub lap_dist_pct: f64,

    // Lap times
    pub lap_current_time: f64,
    pub lap_last_time: f64,
    pub lap_best_time: f64,

    // Fuel
    pub fuel_level: f64,
    pub fuel_level_pct: f64,
    pub fuel_use_per_hour: f64,

    // Pit status
    pub on_pit_road: bool,
    pub pitstop_active: bool,

    // Position
    pub car_idx: i32,
    pub position: i32,
    pub class_position: i32,
    pub speed: f64,

    // Flags
    pub session_flags: u32,

    // Track state
    pub track_temp: f64,
    pub air_temp: f64,
}

impl TelemetrySample {
    /// Decode the fixed field set from a raw sample map.
    pub fn decode(raw: &RawSample) -> Self {
        Self {
            session_time: raw.f64("SessionTime"),
            session_time_remain: raw.f64("SessionTimeRemain"),
            lap: raw.i32("Lap"),
            lap_completed: raw.i32("LapCompleted"),
            lap_dist_pct: raw.f64("LapDistPct"),
            lap_current_time: raw.f64("LapCurrentLapTime"),
            lap_last_time: raw.f64("LapLastLapTime"),
            lap_best_time: raw.f64("LapBestLapTime"),
            fuel_level: raw.f64("FuelLevel"),
            fuel_level_pct: raw.f64("FuelLevelPct"),
            fuel_use_per_hour: raw.f64("FuelUsePerHour"),
            on_pit_road: raw.bool("OnPitRoad"),
            pitstop_active: raw.bool("PitstopActive"),
            car_idx: raw.i32("PlayerCarIdx"),
            position: raw.i32("PlayerCarPosition"),
            class_position: raw.i32("PlayerCarClassPosition"),
            speed: raw.f64("Speed"),
            session_flags: raw.u32("SessionFlags"),
            track_temp: raw.f64("TrackTemp"),
            air_temp: raw.f64("AirTemp"),
        }
    }
}
