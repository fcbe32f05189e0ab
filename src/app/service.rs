//! Actuator service — the hexagonal core.
//!
//! [`ActuatorService`] owns the pairing record, the token registry, and the
//! movement state machine. It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  token + args ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                   │      ActuatorService        │
//!      DrivePort ◀──│  registry · record · state  │──▶ ConfigPort
//!                   └────────────────────────────┘
//! ```

use core::fmt::Write as _;

use log::{info, warn};

use crate::app::commands::{Command, InterruptRequest};
use crate::app::events::AppEvent;
use crate::app::ports::{ConfigPort, DrivePort, EventSink};
use crate::app::state::{ActuatorState, Direction, UNPAIR_WINDOW_SECS};
use crate::config::PairingRecord;
use crate::error::ProtocolError;
use crate::rpc::registry::ActionRegistry;

// ───────────────────────────────────────────────────────────────
// Responses
// ───────────────────────────────────────────────────────────────

/// Wire response line. Fixed capacity — every literal below fits with room
/// for the interpolated address/id/duration fields.
pub type Response = heapless::String<256>;

/// Generic failure line: unknown token, undecodable request, storage fault.
pub const NO_ACTION: &str = "keine action\n";

/// Argument-class failure line (wrong arity, bad direction, bad duration).
pub const BAD_ARGUMENTS: &str = "falsche Angabe von Argumenten\n";

/// Refusal while the unpair window is open.
pub const BUSY: &str = "Aktion laeuft noch...\n";

/// Unpair acknowledgement.
pub const UNPAIR_WAITING: &str = "Warte 30 Seks mit leerer Config....\n";

/// Fixed best-effort position answer — the firmware does not track true
/// shutter position (source limitation, kept verbatim).
pub const ROLL_STATUS: &str = "Der Rolladen steht gereade irgendwo...\n";

fn text(s: &str) -> Response {
    let mut r = Response::new();
    let _ = r.push_str(s);
    r
}

// ───────────────────────────────────────────────────────────────
// ActuatorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ActuatorService {
    record: PairingRecord,
    registry: ActionRegistry,
    state: ActuatorState,
}

impl ActuatorService {
    /// Construct the service from a loaded (or defaulted) pairing record.
    /// Builds the token registry for the record's current salt.
    pub fn new(record: PairingRecord) -> Self {
        let registry = ActionRegistry::new(&record.salt);
        Self {
            record,
            registry,
            state: ActuatorState::Idle,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current movement state.
    pub fn state(&self) -> &ActuatorState {
        &self.state
    }

    /// The one admissible peer address, if paired.
    pub fn paired_address(&self) -> Option<&str> {
        self.record.paired.as_deref()
    }

    /// Wire-level field separator.
    pub fn separator(&self) -> &str {
        &self.record.separator
    }

    /// The live pairing record.
    pub fn record(&self) -> &PairingRecord {
        &self.record
    }

    /// Token registry (client tooling and tests derive tokens through this).
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Maximum time the control loop may block this iteration.
    pub fn poll_interval(&self) -> Option<core::time::Duration> {
        self.state.poll_interval()
    }

    /// Deadline of the pending operation, if any.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.state.deadline_ms()
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Resolve a wire token and run the command.
    ///
    /// `Err(UnknownToken)` is the only protocol-level failure here; argument
    /// failures are answered inside the handler (specific line, no state
    /// change), matching the per-class policies in [`crate::error`].
    pub fn dispatch(
        &mut self,
        token: &str,
        args: &[&str],
        now_ms: u64,
        hw: &mut impl DrivePort,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Result<Response, ProtocolError> {
        let kind = self
            .registry
            .resolve(token)
            .ok_or(ProtocolError::UnknownToken)?;

        match Command::parse(kind, args) {
            Ok(cmd) => Ok(self.handle(cmd, now_ms, hw, store, sink)),
            Err(e) => {
                warn!("{:?}: {}", kind, e);
                Ok(text(BAD_ARGUMENTS))
            }
        }
    }

    /// Run a fully-parsed command.
    pub fn handle(
        &mut self,
        cmd: Command,
        now_ms: u64,
        hw: &mut impl DrivePort,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Response {
        match cmd {
            Command::Pair { address, device_id } => self.pair(&address, &device_id, store, sink),
            Command::Unpair => self.unpair(now_ms, hw, store, sink),
            Command::Roll { direction, seconds } => self.roll(direction, seconds, now_ms, hw, sink),
            Command::RollStatus => self.rollstatus(),
        }
    }

    /// Service an out-of-band urgent request (limit switch, reset button).
    pub fn handle_interrupt(
        &mut self,
        req: InterruptRequest,
        now_ms: u64,
        hw: &mut impl DrivePort,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) {
        match req {
            InterruptRequest::Stop => {
                if let ActuatorState::Moving { direction, .. } = &self.state {
                    let direction = *direction;
                    hw.stop();
                    self.state = ActuatorState::Idle;
                    info!("interrupt: emergency stop while rolling {}", direction);
                    sink.emit(&AppEvent::MovementStopped { direction });
                } else {
                    info!("interrupt: stop with no movement pending");
                }
            }
            InterruptRequest::Roll { direction, seconds } => {
                let _ = self.roll(direction, seconds, now_ms, hw, sink);
            }
            InterruptRequest::Unpair => {
                let _ = self.unpair(now_ms, hw, store, sink);
            }
        }
    }

    // ── Deadline finalization ─────────────────────────────────

    /// Finalize the pending operation once its deadline has passed.
    /// Invoked by the control loop's deadline phase; no-op while idle.
    pub fn finalize_deadline(
        &mut self,
        hw: &mut impl DrivePort,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) {
        match core::mem::replace(&mut self.state, ActuatorState::Idle) {
            ActuatorState::Idle => {}
            ActuatorState::Moving { direction, .. } => {
                hw.stop();
                info!("roll: stopped after {}", direction);
                sink.emit(&AppEvent::MovementStopped { direction });
            }
            ActuatorState::Unpairing { cached, .. } => {
                if let Err(e) = store.write_raw(&cached) {
                    warn!("unpair: restoring cached config failed: {}", e);
                }
                // Salt is unchanged across the window, but the restore is a
                // config write and every config write regenerates tokens.
                self.registry.rebuild(&self.record.salt);
                info!("unpair: window elapsed, pairing restored");
                sink.emit(&AppEvent::PairingRestored);
            }
        }
    }

    // ── Command handlers ──────────────────────────────────────

    /// Bind the actuator to a node (persistent). The candidate record is
    /// persisted first; memory and registry are only updated on a
    /// successful save so a storage fault leaves the old pairing intact.
    fn pair(
        &mut self,
        address: &str,
        device_id: &str,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Response {
        if matches!(self.state, ActuatorState::Unpairing { .. }) {
            warn!("pair: refused, unpair window open");
            return text(BUSY);
        }

        let mut candidate = self.record.clone();
        candidate.paired = Some(address.to_owned());
        candidate.device_id = device_id.to_owned();
        candidate.salt = device_id.to_owned();

        if let Err(e) = store.save(&candidate) {
            warn!("pair: config save failed: {}", e);
            return text(NO_ACTION);
        }

        self.record = candidate;
        self.registry.rebuild(&self.record.salt);
        info!("pair: bound to {} (id {})", address, device_id);
        sink.emit(&AppEvent::Paired {
            address: address.to_owned(),
            device_id: device_id.to_owned(),
        });

        let mut r = Response::new();
        let _ = writeln!(r, "erfolgreich gepaired zu {address} ID: {device_id}");
        r
    }

    /// Open the temporary unpair window: snapshot the stored bytes, wipe
    /// the store, and arm the restore deadline. A power cycle inside the
    /// window boots unpaired; surviving the window restores the snapshot.
    fn unpair(
        &mut self,
        now_ms: u64,
        hw: &mut impl DrivePort,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Response {
        if matches!(self.state, ActuatorState::Unpairing { .. }) {
            warn!("unpair: refused, window already open");
            return text(BUSY);
        }

        // Never leave the motor running unattended through the window.
        if let ActuatorState::Moving { direction, .. } = &self.state {
            let direction = *direction;
            hw.stop();
            sink.emit(&AppEvent::MovementStopped { direction });
        }

        let cached = match store.read_raw() {
            Ok(c) => c,
            Err(e) => {
                warn!("unpair: cannot snapshot config: {}", e);
                return text(NO_ACTION);
            }
        };
        if let Err(e) = store.write_raw("") {
            warn!("unpair: cannot wipe config: {}", e);
            return text(NO_ACTION);
        }

        self.state = ActuatorState::Unpairing {
            deadline_ms: now_ms + UNPAIR_WINDOW_SECS * 1_000,
            cached,
        };
        info!(
            "unpair: waiting {} s with empty config",
            UNPAIR_WINDOW_SECS
        );
        sink.emit(&AppEvent::UnpairingStarted {
            window_secs: UNPAIR_WINDOW_SECS,
        });
        text(UNPAIR_WAITING)
    }

    /// Move the shutter. Re-rolling while already moving re-drives the
    /// motor and replaces the deadline.
    fn roll(
        &mut self,
        direction: Direction,
        seconds: u64,
        now_ms: u64,
        hw: &mut impl DrivePort,
        sink: &mut impl EventSink,
    ) -> Response {
        if matches!(self.state, ActuatorState::Unpairing { .. }) {
            warn!("roll: refused, unpair window open");
            return text(BUSY);
        }

        hw.drive(direction);
        // Durations are client-controlled; saturate rather than overflow.
        self.state = ActuatorState::Moving {
            direction,
            deadline_ms: now_ms.saturating_add(seconds.saturating_mul(1_000)),
        };
        info!("roll: {} for {} s", direction, seconds);
        sink.emit(&AppEvent::MovementStarted { direction, seconds });

        let mut r = Response::new();
        let _ = writeln!(r, "Rolle nach {direction} fuer {seconds} Sekunden");
        r
    }

    /// Best-effort position query; no state change.
    fn rollstatus(&self) -> Response {
        info!("rollstatus");
        text(ROLL_STATUS)
    }
}
