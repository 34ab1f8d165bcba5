//! Completed-lap records.

use serde::Serialize;

/// Derived summary of one completed lap. Appended to the session's lap
/// history in completion order and immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    pub lap_number: i32,
    pub lap_time: f64,
    pub session_time: f64,
    pub fuel_at_start: f64,
    pub fuel_at_end: f64,
    /// Clamped to zero when refuelling made the delta negative.
    pub fuel_used: f64,
    pub position: i32,
    pub class_position: i32,
    pub is_valid: bool,
    pub is_best_lap: bool,
}
