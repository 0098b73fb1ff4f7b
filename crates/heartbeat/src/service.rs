//! The beat loop.
//!
//! [`HeartbeatService`] announces startup exactly once, then emits one
//! [`Beat`] per interval over a channel. The consumer decides how to surface
//! events; the loop itself only reads the clock and keeps the cadence.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::HeartbeatConfig;
use crate::error::HeartbeatError;
use crate::tick::Tick;

/// Buffered events between the loop and a slow consumer.
const EVENT_BUFFER: usize = 32;

/// One heartbeat observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// 1-based position of this beat in the stream.
    pub seq: u64,
    /// Wall-clock reading taken when the beat was emitted.
    pub tick: Tick,
}

/// Events emitted by the beat loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatEvent {
    /// Emitted exactly once, before any beat.
    Started,
    /// A periodic liveness beat.
    Beat(Beat),
}

/// Background service that announces startup and then beats at a fixed
/// cadence until stopped or the event receiver goes away.
pub struct HeartbeatService {
    config: HeartbeatConfig,
    running: Arc<RwLock<bool>>,
    events: mpsc::Sender<HeartbeatEvent>,
}

impl HeartbeatService {
    /// Create a service and the receiver its events arrive on.
    pub fn new(config: HeartbeatConfig) -> (Self, mpsc::Receiver<HeartbeatEvent>) {
        let (events, rx) = mpsc::channel(EVENT_BUFFER);
        let service = Self {
            config,
            running: Arc::new(RwLock::new(false)),
            events,
        };
        (service, rx)
    }

    /// Effective configuration.
    pub fn config(&self) -> &HeartbeatConfig {
        &self.config
    }

    /// Start the beat loop in the background.
    ///
    /// The first beat follows the startup event immediately; every later
    /// beat waits one interval. The loop has no exit condition of its own:
    /// it runs until [`stop`](Self::stop) is called or the receiver is
    /// dropped.
    pub async fn start(&self) -> Result<(), HeartbeatError> {
        {
            let mut running = self.running.write().await;
            if *running {
                warn!("heartbeat service already running");
                return Ok(());
            }
            *running = true;
        }

        // A zero period would make the timer spin.
        let interval = self.config.interval.max(Duration::from_millis(1));
        let events = self.events.clone();
        let running = Arc::clone(&self.running);

        info!(
            interval_secs = self.config.interval.as_secs(),
            "heartbeat service started"
        );

        tokio::spawn(async move {
            if let Err(e) = Self::beat_loop(interval, &events, &running).await {
                warn!(error = %e, "heartbeat loop ended");
            }
            *running.write().await = false;
        });

        Ok(())
    }

    /// Ask the loop to stop at its next tick.
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
    }

    /// Returns whether the loop is currently beating.
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    async fn beat_loop(
        interval: Duration,
        events: &mpsc::Sender<HeartbeatEvent>,
        running: &RwLock<bool>,
    ) -> Result<(), HeartbeatError> {
        events
            .send(HeartbeatEvent::Started)
            .await
            .map_err(|_| HeartbeatError::ChannelClosed)?;

        let mut ticker = tokio::time::interval(interval);
        // Every beat is followed by a full interval of sleep; a delayed tick
        // must not trigger a burst of catch-up beats.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut seq: u64 = 0;

        loop {
            ticker.tick().await;

            if !*running.read().await {
                debug!("heartbeat loop stopped");
                return Ok(());
            }

            seq += 1;
            let beat = Beat {
                seq,
                tick: Tick::now(),
            };

            events
                .send(HeartbeatEvent::Beat(beat))
                .await
                .map_err(|_| HeartbeatError::ChannelClosed)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout, timeout_at};

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    fn short_config(interval: Duration) -> HeartbeatConfig {
        HeartbeatConfig {
            interval,
            ..HeartbeatConfig::default()
        }
    }

    async fn next_event(rx: &mut mpsc::Receiver<HeartbeatEvent>) -> HeartbeatEvent {
        timeout(RECV_TIMEOUT, rx.recv())
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("no event within {RECV_TIMEOUT:?}"))
    }

    #[tokio::test]
    async fn startup_event_precedes_all_beats() {
        let (service, mut rx) = HeartbeatService::new(short_config(Duration::from_millis(20)));
        service.start().await.unwrap();

        assert_eq!(next_event(&mut rx).await, HeartbeatEvent::Started);
        assert!(matches!(
            next_event(&mut rx).await,
            HeartbeatEvent::Beat(Beat { seq: 1, .. })
        ));

        service.stop().await;
    }

    #[tokio::test]
    async fn beats_count_up_with_increasing_ticks() {
        let (service, mut rx) = HeartbeatService::new(short_config(Duration::from_millis(10)));
        service.start().await.unwrap();

        assert_eq!(next_event(&mut rx).await, HeartbeatEvent::Started);

        let mut beats = Vec::new();
        while beats.len() < 3 {
            if let HeartbeatEvent::Beat(beat) = next_event(&mut rx).await {
                beats.push(beat);
            }
        }

        for (i, beat) in beats.iter().enumerate() {
            assert_eq!(beat.seq, i as u64 + 1);
        }
        for pair in beats.windows(2) {
            assert!(pair[1].tick > pair[0].tick);
        }

        service.stop().await;
    }

    // The production scenario (observe a 30s heartbeat for 65s, expect one
    // startup line and at least two beats) scaled down to milliseconds.
    #[tokio::test]
    async fn observation_window_sees_one_startup_and_at_least_two_beats() {
        let (service, mut rx) = HeartbeatService::new(short_config(Duration::from_millis(20)));
        service.start().await.unwrap();

        let deadline = Instant::now() + Duration::from_millis(150);
        let mut startups = 0;
        let mut beats: Vec<Beat> = Vec::new();

        while let Ok(Some(event)) = timeout_at(deadline, rx.recv()).await {
            match event {
                HeartbeatEvent::Started => startups += 1,
                HeartbeatEvent::Beat(beat) => beats.push(beat),
            }
        }

        assert_eq!(startups, 1);
        assert!(beats.len() >= 2, "only {} beats observed", beats.len());
        for pair in beats.windows(2) {
            assert!(pair[1].tick > pair[0].tick);
        }

        service.stop().await;
    }

    #[tokio::test]
    async fn beats_keep_at_least_half_an_interval_apart() {
        let interval = Duration::from_millis(40);
        let (service, mut rx) = HeartbeatService::new(short_config(interval));
        service.start().await.unwrap();

        let mut beats = Vec::new();
        while beats.len() < 3 {
            if let HeartbeatEvent::Beat(beat) = next_event(&mut rx).await {
                beats.push(beat);
            }
        }

        let floor = interval.as_nanos() / 2;
        for pair in beats.windows(2) {
            let gap = pair[1].tick.as_nanos() - pair[0].tick.as_nanos();
            assert!(gap >= floor, "beats only {gap}ns apart");
        }

        service.stop().await;
    }

    #[tokio::test]
    async fn second_start_does_not_spawn_a_second_loop() {
        let (service, mut rx) = HeartbeatService::new(short_config(Duration::from_millis(10)));
        service.start().await.unwrap();
        service.start().await.unwrap();

        assert_eq!(next_event(&mut rx).await, HeartbeatEvent::Started);
        // A duplicate loop would announce itself again.
        assert!(matches!(
            next_event(&mut rx).await,
            HeartbeatEvent::Beat(_)
        ));

        service.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let (service, mut rx) = HeartbeatService::new(short_config(Duration::from_millis(10)));
        service.start().await.unwrap();
        assert_eq!(next_event(&mut rx).await, HeartbeatEvent::Started);

        service.stop().await;

        let mut stopped = false;
        for _ in 0..100 {
            if !service.is_running().await {
                stopped = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(stopped, "loop still running after stop");
    }

    #[tokio::test]
    async fn dropped_receiver_stops_the_loop() {
        let (service, rx) = HeartbeatService::new(short_config(Duration::from_millis(10)));
        drop(rx);
        service.start().await.unwrap();

        let mut stopped = false;
        for _ in 0..100 {
            if !service.is_running().await {
                stopped = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(stopped, "loop still running after receiver dropped");
    }
}
