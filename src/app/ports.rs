//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ActuatorService (domain)
//! ```
//!
//! Driven adapters (motor driver, config storage, event sinks, clock)
//! implement these traits. The service consumes them via generics at call
//! sites, so the domain core never touches GPIO or the filesystem directly.

use crate::app::state::Direction;
use crate::config::PairingRecord;
use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// Drive port (driven adapter: domain → motor hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to switch the shutter motor.
pub trait DrivePort {
    /// Energise the motor in `direction`. Re-driving while already moving
    /// switches direction without an intermediate stop.
    fn drive(&mut self, direction: Direction);

    /// Cut motor power.
    fn stop(&mut self);

    /// Whether the motor is currently energised.
    fn is_driving(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent record)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the pairing record.
///
/// The raw accessors exist for the unpair cycle, which must snapshot and
/// restore the stored bytes exactly — including content this firmware
/// version would not itself have written.
pub trait ConfigPort {
    /// Load the pairing record from storage.
    fn load(&self) -> Result<PairingRecord, ConfigError>;

    /// Persist the record (4-line text form). Not atomic — a power loss
    /// mid-write surfaces as `Corrupt` on the next load.
    fn save(&self, record: &PairingRecord) -> Result<(), ConfigError>;

    /// Read the stored content verbatim.
    fn read_raw(&self) -> Result<String, ConfigError>;

    /// Overwrite the stored content verbatim.
    fn write_raw(&self, content: &str) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ← monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic firmware clock, milliseconds since boot.
///
/// Deadlines are stored as absolute values of this clock; tests drive the
/// state machine with a mock that advances time instantly.
pub trait Clock {
    fn now_ms(&self) -> u64;
}
