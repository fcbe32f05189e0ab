//! Actuator movement state machine types.
//!
//! The actuator is in exactly one of three modes at any time; the two
//! non-idle modes carry an absolute deadline (milliseconds on the firmware
//! clock) at which the control loop finalizes them. The poll interval bounds
//! how long the loop may block before re-checking that deadline.

use core::fmt;
use core::time::Duration;

/// Movement direction of the roller shutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Parse the wire-level direction argument.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long the unpair window keeps the persisted config empty.
pub const UNPAIR_WINDOW_SECS: u64 = 30;

/// Loop poll cadence while the motor runs (deadline check latency bound).
pub const MOVING_POLL: Duration = Duration::from_millis(300);

/// Loop poll cadence during the unpair window.
pub const UNPAIRING_POLL: Duration = Duration::from_secs(1);

/// Tagged actuator state. At most one pending operation exists at a time
/// (single actuator, single motor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorState {
    /// Nothing pending; the loop may block indefinitely.
    Idle,
    /// Motor energised until `deadline_ms`.
    Moving {
        direction: Direction,
        deadline_ms: u64,
    },
    /// Persisted config wiped until `deadline_ms`; `cached` holds the exact
    /// bytes to restore when the window closes.
    Unpairing { deadline_ms: u64, cached: String },
}

impl ActuatorState {
    /// Maximum time the control loop may block before re-checking the
    /// deadline. `None` while idle — nothing time-sensitive is pending.
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Moving { .. } => Some(MOVING_POLL),
            Self::Unpairing { .. } => Some(UNPAIRING_POLL),
        }
    }

    /// Absolute deadline of the pending operation, if any.
    pub fn deadline_ms(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Moving { deadline_ms, .. } | Self::Unpairing { deadline_ms, .. } => {
                Some(*deadline_ms)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
