//! Stateful event derivation: session tracking, lap and pit detection,
//! and the session-scoped context they mutate.

mod laps;
mod pits;
mod session;
mod state;

pub use laps::LapDetector;
pub use pits::PitDetector;
pub use session::SessionTracker;
pub use state::{RaceState, SNAPSHOT_LAP_COUNT, SharedState};
