//! Runtime configuration.
//!
//! Read once at startup from the environment. Invalid values fall back to
//! the documented defaults with a warning rather than failing startup.

use std::time::Duration;

use tracing::warn;

/// Default WebSocket listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable overriding the listening port.
pub const PORT_VAR: &str = "PITWIRE_PORT";

/// Environment variable overriding the polling period, in milliseconds.
pub const POLL_MS_VAR: &str = "PITWIRE_POLL_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// WebSocket listening port.
    pub port: u16,
    /// Telemetry polling period.
    pub poll_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, poll_period: crate::monitor::DEFAULT_POLL_PERIOD }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::var(PORT_VAR).ok(), std::env::var(POLL_MS_VAR).ok())
    }

    fn from_vars(port: Option<String>, poll_ms: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = port {
            match value.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!(%value, "Ignoring invalid {PORT_VAR}"),
            }
        }

        if let Some(value) = poll_ms {
            match value.parse::<u64>() {
                Ok(ms) if ms > 0 => config.poll_period = Duration::from_millis(ms),
                _ => warn!(%value, "Ignoring invalid {POLL_MS_VAR}"),
            }
        }

        config
    }
}
