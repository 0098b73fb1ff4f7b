//! Error types for the heartbeat crate.

use thiserror::Error;

/// Errors surfaced by the heartbeat service.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// The event receiver was dropped while the loop was still beating.
    #[error("heartbeat event channel closed")]
    ChannelClosed,
}
