//! Concrete telemetry sources.
//!
//! The native Windows shared-memory provider lives behind the
//! [`TelemetrySource`](crate::source::TelemetrySource) boundary and is not
//! part of this crate; the replay source covers development and testing on
//! any platform.

mod replay;

pub use replay::ReplaySource;
