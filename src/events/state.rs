//! Session-scoped derived state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::protocol::Snapshot;
use crate::types::{LapRecord, PitStopRecord, Session};

/// How many recent laps a snapshot carries.
pub const SNAPSHOT_LAP_COUNT: usize = 10;

/// All derived state for the current session: connection status, session
/// identity, and the lap/pit histories. Mutated only by the monitor tick;
/// read concurrently by the hub when building snapshots for new subscribers.
#[derive(Debug, Default)]
pub struct RaceState {
    pub connected: bool,
    pub session: Option<Session>,
    pub laps: Vec<LapRecord>,
    pub pit_stops: Vec<PitStopRecord>,
}

/// Shared handle: single writer (the monitor), concurrent snapshot readers.
pub type SharedState = Arc<RwLock<RaceState>>;

impl RaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Clear the histories kept for the active session. Called on session
    /// transition; the new session replaces the old one separately.
    pub fn reset_session_data(&mut self) {
        self.laps.clear();
        self.pit_stops.clear();
    }

    /// Full reset on disconnect: no session, empty histories.
    pub fn clear(&mut self) {
        self.session = None;
        self.reset_session_data();
    }

    /// Build the attach-time snapshot: connection status, current session,
    /// the most recent laps, and the entire pit history.
    pub fn snapshot(&self) -> Snapshot {
        let lap_start = self.laps.len().saturating_sub(SNAPSHOT_LAP_COUNT);
        Snapshot {
            is_connected: self.connected,
            session: self.session.clone(),
            laps: self.laps[lap_start..].to_vec(),
            pit_stops: self.pit_stops.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(n: i32) -> LapRecord {
        LapRecord {
            lap_number: n,
            lap_time: 90.0,
            session_time: n as f64 * 90.0,
            fuel_at_start: 50.0,
            fuel_at_end: 48.0,
            fuel_used: 2.0,
            position: 1,
            class_position: 1,
            is_valid: true,
            is_best_lap: false,
        }
    }

    #[test]
    fn snapshot_truncates_laps_to_most_recent_ten() {
        let mut state = RaceState::new();
        for n in 1..=15 {
            state.laps.push(lap(n));
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.laps.len(), 10);
        let numbers: Vec<i32> = snapshot.laps.iter().map(|l| l.lap_number).collect();
        assert_eq!(numbers, (6..=15).collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_keeps_entire_pit_history() {
        let mut state = RaceState::new();
        for n in 1..=12 {
            state.laps.push(lap(n));
            state.pit_stops.push(crate::types::OpenPitStop {
                stop_number: n as u32,
                lap_number: n,
                pit_in_time: 0.0,
                fuel_before: 0.0,
            }
            .complete(10.0, 5.0));
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.laps.len(), 10);
        assert_eq!(snapshot.pit_stops.len(), 12);
    }

    #[test]
    fn clear_empties_everything() {
        let mut state = RaceState::new();
        state.laps.push(lap(1));
        state.session = None;
        state.connected = true;
        state.clear();

        assert!(state.laps.is_empty());
        assert!(state.pit_stops.is_empty());
        assert!(state.session.is_none());

        let snapshot = state.snapshot();
        assert!(snapshot.laps.is_empty());
        assert!(snapshot.session.is_none());
    }
}
