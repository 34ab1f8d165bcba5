//! Pitwire service binary.
//!
//! Plays a telemetry recording through the event-derivation pipeline and
//! serves derived events to WebSocket subscribers. A missing or unreadable
//! recording is the only fault that terminates the process.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pitwire::sources::ReplaySource;
use pitwire::{Config, Service};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let recording = std::env::args()
        .nth(1)
        .context("usage: pitwire <recording.jsonl>")?;

    let source = ReplaySource::open(&recording)
        .await
        .with_context(|| format!("opening recording {recording}"))?;

    let config = Config::from_env();
    let service = Service::start(source, config).await.context("starting service")?;
    info!(addr = %service.local_addr(), "pitwire running, press Ctrl+C to stop");

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    service.shutdown().await;

    Ok(())
}
