//! Vigil beacon daemon.
//!
//! Announces startup once, then emits a heartbeat line carrying a wall-clock
//! tick count every interval. There is no exit condition: the process runs
//! until it is killed.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vigil_heartbeat::{HeartbeatConfig, HeartbeatEvent, HeartbeatService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = HeartbeatConfig::from_env();
    info!(
        interval_secs = config.interval.as_secs(),
        "starting vigil beacon"
    );

    let (service, mut events) = HeartbeatService::new(config);
    service.start().await?;

    while let Some(event) = events.recv().await {
        match event {
            HeartbeatEvent::Started => info!("{}", service.config().startup_message),
            HeartbeatEvent::Beat(beat) => {
                info!(seq = beat.seq, tick = %beat.tick, "{}", service.config().beat_message);
            }
        }
    }

    Ok(())
}
