//! Vigil heartbeat engine.
//!
//! A heartbeat keeps a process observably alive: the service announces
//! startup exactly once, then emits a beat carrying a wall-clock tick count
//! at a fixed cadence until the process is killed. The loop itself lives
//! here so its ordering and cadence guarantees can be exercised without
//! running a daemon.
//!
//! Consumers receive [`HeartbeatEvent`]s over a channel and decide how to
//! surface them; the beacon binary logs them to stdout.

pub mod config;
pub mod service;
pub mod tick;

mod error;

pub use config::HeartbeatConfig;
pub use error::HeartbeatError;
pub use service::{Beat, HeartbeatEvent, HeartbeatService};
pub use tick::Tick;
