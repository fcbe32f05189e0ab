//! Wire subsystem — everything between the socket bytes and the typed
//! command set.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     Request path                          │
//! │                                                           │
//! │  ┌─────────┐   ┌────────────┐   ┌─────────────────────┐  │
//! │  │  Socket  │──▶│ wire codec │──▶│ registry (token →   │  │
//! │  │  bytes   │   │ (separator │   │  CommandKind)       │  │
//! │  └─────────┘   │  split)    │   └─────────────────────┘  │
//! │                └────────────┘              │              │
//! │                                            ▼              │
//! │  interrupt slot ────priority───▶  ActuatorService         │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod interrupt;
pub mod registry;
pub mod wire;
