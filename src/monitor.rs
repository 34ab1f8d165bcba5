//! Fixed-period polling of the telemetry source.
//!
//! The monitor's tick is the single driver of state mutation in the
//! session tracker and both detectors: one tick fully completes, including
//! every emitted event, before the next begins, and an overrunning tick is
//! skipped rather than overlapped. Source faults are downgraded to a
//! disconnect signal and logged here; they never propagate.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{LapDetector, PitDetector, SessionTracker, SharedState};
use crate::hub::BroadcastHub;
use crate::protocol::Event;
use crate::source::TelemetrySource;
use crate::types::TelemetrySample;

/// Default polling period (10 Hz).
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Polls the source, detects connect/disconnect transitions, and feeds the
/// derivation pipeline: session tracker first, then both detectors, within
/// the same tick.
pub struct ConnectionMonitor<S: TelemetrySource> {
    source: S,
    state: SharedState,
    hub: Arc<BroadcastHub>,
    period: Duration,
    sessions: SessionTracker,
    laps: LapDetector,
    pits: PitDetector,
}

impl<S: TelemetrySource> ConnectionMonitor<S> {
    pub fn new(source: S, state: SharedState, hub: Arc<BroadcastHub>, period: Duration) -> Self {
        Self {
            source,
            state,
            hub,
            period,
            sessions: SessionTracker::new(),
            laps: LapDetector::new(),
            pits: PitDetector::new(),
        }
    }

    /// Run the polling loop until cancelled.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(period = ?self.period, "Connection monitor started");

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Connection monitor cancelled");
                    break;
                }
                _ = ticker.tick() => {}
            }
            self.tick().await;
        }

        info!("Connection monitor stopped");
    }

    /// One polling cycle. Public so tests can drive the pipeline without
    /// real timing.
    pub async fn tick(&mut self) {
        let doc = match self.source.session_document().await {
            Ok(doc) => doc,
            Err(e) => {
                debug!(error = %e, "Session document read failed");
                None
            }
        };
        let raw = match self.source.sample().await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "Sample read failed");
                None
            }
        };

        let available = doc.is_some() && raw.is_some();
        let was_connected = self.state.read().await.connected;

        if available && !was_connected {
            info!("Connected to iRacing");
            self.state.write().await.connected = true;
            self.hub.publish(&Event::connected_now()).await;
        } else if !available && was_connected {
            self.on_disconnect().await;
        }

        let (Some(doc), Some(raw)) = (doc, raw) else {
            return;
        };

        // Session state must be current before lap/pit logic runs against it.
        if let Some(session) = self.sessions.update(&doc) {
            self.laps.reset();
            self.pits.reset();
            {
                let mut state = self.state.write().await;
                state.reset_session_data();
                state.session = Some(session.clone());
            }
            self.hub.publish(&Event::SessionInfo(session)).await;
        }

        let sample = TelemetrySample::decode(&raw);
        self.hub.publish(&Event::Telemetry(sample.clone())).await;

        if self.state.read().await.session.is_none() {
            return;
        }

        if let Some(lap) = self.laps.on_sample(&sample) {
            self.state.write().await.laps.push(lap.clone());
            self.hub.publish(&Event::LapCompleted(lap)).await;
        }

        if let Some(stop) = self.pits.on_sample(&sample) {
            self.state.write().await.pit_stops.push(stop.clone());
            self.hub.publish(&Event::PitStop(stop)).await;
        }
    }

    /// Full-state reset on the connected→disconnected transition.
    async fn on_disconnect(&mut self) {
        warn!("Disconnected from iRacing");

        self.sessions.reset();
        self.laps.reset();
        self.pits.reset();
        {
            let mut state = self.state.write().await;
            state.connected = false;
            state.clear();
        }
        self.hub.publish(&Event::disconnected_now()).await;
    }
}
