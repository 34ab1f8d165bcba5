//! Event-derivation and broadcast service for iRacing telemetry.
//!
//! Pitwire polls a raw telemetry source at a fixed period, derives discrete
//! domain events — session changes, completed laps, pit stops — from the
//! noisy high-frequency sample stream, and republishes them as JSON
//! envelopes to any number of WebSocket subscribers. Newly attached
//! subscribers receive a consistent snapshot of the current state.
//!
//! # Architecture
//!
//! ```text
//! TelemetrySource ──► ConnectionMonitor ──► SessionTracker
//!      (poll)              (tick)          LapDetector / PitDetector
//!                            │                    │
//!                            ▼                    ▼
//!                        RaceState ◄───── derived records
//!                            │
//!                            ▼
//!                       BroadcastHub ──► WebSocket subscribers
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pitwire::{Config, Service, sources::ReplaySource};
//!
//! #[tokio::main]
//! async fn main() -> pitwire::Result<()> {
//!     let source = ReplaySource::open("race.jsonl").await?;
//!     let service = Service::start(source, Config::default()).await?;
//!     // ... run until shutdown is requested ...
//!     service.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod events;
pub mod hub;
pub mod monitor;
pub mod protocol;
pub mod schema;
pub mod server;
pub mod source;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{PitwireError, Result};
pub use events::{LapDetector, PitDetector, RaceState, SessionTracker};
pub use hub::BroadcastHub;
pub use monitor::ConnectionMonitor;
pub use protocol::{Event, Snapshot};
pub use schema::SessionDocument;
pub use source::TelemetrySource;
pub use types::{LapRecord, PitStopRecord, RawSample, RawValue, Session, TelemetrySample};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// A running pitwire service: polling monitor plus WebSocket listener.
///
/// Shutdown follows the order that prevents sends to closing connections:
/// stop the polling ticker, close all subscriber channels, then release
/// the listener.
pub struct Service {
    hub: Arc<BroadcastHub>,
    local_addr: SocketAddr,
    monitor_cancel: CancellationToken,
    server_cancel: CancellationToken,
    monitor_task: JoinHandle<()>,
    server_task: JoinHandle<()>,
}

impl Service {
    /// Start the service: bind the listener, then spawn the monitor and
    /// accept loops.
    pub async fn start<S: TelemetrySource>(source: S, config: Config) -> Result<Self> {
        let state = RaceState::shared();
        let hub = Arc::new(BroadcastHub::new(state.clone()));

        let listener = server::bind(config.port).await?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| PitwireError::transport_error("local address", Box::new(e)))?;

        let monitor_cancel = CancellationToken::new();
        let server_cancel = CancellationToken::new();

        let monitor =
            ConnectionMonitor::new(source, state, Arc::clone(&hub), config.poll_period);
        let monitor_task = tokio::spawn(monitor.run(monitor_cancel.clone()));
        let server_task =
            tokio::spawn(server::run(listener, Arc::clone(&hub), server_cancel.clone()));

        Ok(Self { hub, local_addr, monitor_cancel, server_cancel, monitor_task, server_task })
    }

    /// The bound listening address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shared hub handle, e.g. for in-process subscribers.
    pub fn hub(&self) -> Arc<BroadcastHub> {
        Arc::clone(&self.hub)
    }

    /// Stop the service in dependency order.
    pub async fn shutdown(self) {
        info!("Shutting down");

        self.monitor_cancel.cancel();
        let _ = self.monitor_task.await;

        self.hub.close_all().await;

        self.server_cancel.cancel();
        let _ = self.server_task.await;

        info!("Shutdown complete");
    }
}
