//! Shutter motor adapter.
//!
//! Implements [`DrivePort`] over the motor's H-bridge relay pair. One relay
//! selects winding polarity (direction), the other gates power. On this
//! build the GPIO writes are stubbed behind state tracking and log lines;
//! the device build switches real pins behind the same trait.
//!
//! Re-driving while energised flips the polarity relay without an
//! intermediate stop — the bridge tolerates a live direction change.

use log::info;

use crate::app::ports::DrivePort;
use crate::app::state::Direction;

/// Electrical state of the motor bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Driving(Direction),
}

/// Relay-pair motor driver.
pub struct RelayShutterDriver {
    state: MotorState,
}

impl Default for RelayShutterDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayShutterDriver {
    pub fn new() -> Self {
        Self {
            state: MotorState::Stopped,
        }
    }

    pub fn state(&self) -> MotorState {
        self.state
    }
}

impl DrivePort for RelayShutterDriver {
    fn drive(&mut self, direction: Direction) {
        info!("motor: drive {}", direction);
        self.state = MotorState::Driving(direction);
    }

    fn stop(&mut self) {
        if self.state != MotorState::Stopped {
            info!("motor: stop");
        }
        self.state = MotorState::Stopped;
    }

    fn is_driving(&self) -> bool {
        matches!(self.state, MotorState::Driving(_))
    }
}
