//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production). A future adapter pushing
//! events back to the controller node would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { paired } => {
                info!(
                    "START | paired={}",
                    if *paired { "yes" } else { "no" }
                );
            }
            AppEvent::Paired { address, device_id } => {
                info!("PAIR  | node={} id={}", address, device_id);
            }
            AppEvent::UnpairingStarted { window_secs } => {
                info!("PAIR  | unpair window open, {} s", window_secs);
            }
            AppEvent::PairingRestored => {
                info!("PAIR  | window elapsed, pairing restored");
            }
            AppEvent::MovementStarted { direction, seconds } => {
                info!("MOVE  | {} for {} s", direction, seconds);
            }
            AppEvent::MovementStopped { direction } => {
                info!("MOVE  | stopped ({})", direction);
            }
        }
    }
}
