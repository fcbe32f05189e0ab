//! Urgent-request slot.
//!
//! A single-slot signal bridging interrupt context (limit switch, physical
//! reset button) with the control loop. `embassy-sync`'s `Signal` keeps the
//! latest pending request without heap allocation; a newer urgent request
//! overwrites an unconsumed older one, which is the right policy for
//! "latest command wins" hardware inputs.
//!
//! The control loop drains this slot **before** deadline and socket work on
//! every iteration — strict priority is part of the contract.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::app::commands::InterruptRequest;

/// The one urgent-request slot.
static INTERRUPT: Signal<CriticalSectionRawMutex, InterruptRequest> = Signal::new();

/// Raise an urgent request. Safe to call from any context; overwrites a
/// pending unconsumed request.
pub fn raise(req: InterruptRequest) {
    INTERRUPT.signal(req);
}

/// Take the pending request, if any, clearing the slot.
pub fn try_take() -> Option<InterruptRequest> {
    INTERRUPT.try_take()
}

/// Wait until a request is raised. Used by the control loop's wait phase so
/// an interrupt wakes it out of a socket block immediately.
pub async fn next() -> InterruptRequest {
    INTERRUPT.wait().await
}
