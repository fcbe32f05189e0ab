//! Outbound application events.
//!
//! The [`ActuatorService`](super::service::ActuatorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — log to the console today, push
//! to the controller node tomorrow.

use crate::app::state::Direction;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries whether a pairing was loaded).
    Started { paired: bool },

    /// The device was bound to a controller node and the record persisted.
    Paired { address: String, device_id: String },

    /// The unpair window opened; persisted config is empty until it closes.
    UnpairingStarted { window_secs: u64 },

    /// The unpair window elapsed and the cached pairing was written back.
    PairingRestored,

    /// The motor was energised.
    MovementStarted { direction: Direction, seconds: u64 },

    /// The motor was stopped (deadline, emergency stop, or pre-unpair halt).
    MovementStopped { direction: Direction },
}
