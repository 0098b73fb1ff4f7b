//! Wall-clock tick counts.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Nanoseconds elapsed since the Unix epoch at the moment of a wall-clock
/// reading.
///
/// Displays as a plain decimal integer, which is exactly what the heartbeat
/// line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u128);

impl Tick {
    /// Read the wall clock.
    ///
    /// A clock set before the Unix epoch saturates to zero rather than
    /// failing; the heartbeat has no fallible operations.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Self(elapsed.as_nanos())
    }

    /// Build a tick from a raw nanosecond count.
    pub const fn from_nanos(nanos: u128) -> Self {
        Self(nanos)
    }

    /// Raw nanosecond count.
    pub const fn as_nanos(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
