//! Domain types: raw values, decoded samples, and derived records.

mod lap;
mod pit;
mod sample;
mod session;
mod value;

pub use lap::LapRecord;
pub use pit::{OpenPitStop, PitStopRecord};
pub use sample::{RawSample, TelemetrySample};
pub use session::Session;
pub use value::{RawValue, VarKind};
