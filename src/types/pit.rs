//! Pit-stop records.

use serde::Serialize;

/// Derived summary of one complete pit-road visit, appended to history at
/// pit exit. `stop_number` is 1-based and strictly increasing per session.
///
/// `tyres_changed` and `repairs_made` are not derivable from the available
/// telemetry fields and are always `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStopRecord {
    pub stop_number: u32,
    pub lap_number: i32,
    pub pit_in_time: f64,
    pub pit_out_time: f64,
    pub pit_duration: f64,
    pub fuel_before: f64,
    pub fuel_after: f64,
    pub fuel_added: f64,
    pub tyres_changed: bool,
    pub repairs_made: bool,
}

/// Entry-side data captured when the car crosses onto pit road, pending
/// completion at exit. At most one open stop exists at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPitStop {
    pub stop_number: u32,
    pub lap_number: i32,
    pub pit_in_time: f64,
    pub fuel_before: f64,
}

impl OpenPitStop {
    /// Complete this stop with exit-side telemetry.
    pub fn complete(self, pit_out_time: f64, fuel_after: f64) -> PitStopRecord {
        PitStopRecord {
            stop_number: self.stop_number,
            lap_number: self.lap_number,
            pit_in_time: self.pit_in_time,
            pit_out_time,
            pit_duration: pit_out_time - self.pit_in_time,
            fuel_before: self.fuel_before,
            fuel_after,
            fuel_added: fuel_after - self.fuel_before,
            tyres_changed: false,
            repairs_made: false,
        }
    }
}
