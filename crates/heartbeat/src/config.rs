//! Heartbeat configuration.
//!
//! Supports configuration via environment variables. Absent or unparsable
//! values fall back to the defaults, which match the production cadence.

use std::time::Duration;

/// Default pause between beats.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Heartbeat loop configuration.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Pause between beats.
    pub interval: Duration,
    /// Message emitted once at startup.
    pub startup_message: String,
    /// Message emitted with every beat.
    pub beat_message: String,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            startup_message: "beacon service started".to_string(),
            beat_message: "service alive".to_string(),
        }
    }
}

impl HeartbeatConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(interval) = std::env::var("VIGIL_HEARTBEAT_INTERVAL_SECS")
            .ok()
            .and_then(|raw| parse_interval_secs(&raw))
        {
            config.interval = interval;
        }

        if let Ok(message) = std::env::var("VIGIL_STARTUP_MESSAGE") {
            if !message.is_empty() {
                config.startup_message = message;
            }
        }

        if let Ok(message) = std::env::var("VIGIL_BEAT_MESSAGE") {
            if !message.is_empty() {
                config.beat_message = message;
            }
        }

        config
    }
}

/// Parse an interval in whole seconds, clamped to at least one second so the
/// loop cannot spin.
fn parse_interval_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .map(|secs| Duration::from_secs(secs.max(1)))
}
