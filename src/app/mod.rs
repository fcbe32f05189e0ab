//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the ShutterLink actuator:
//! the typed command set, the movement state machine, and the
//! [`ActuatorService`](service::ActuatorService) that owns both. All
//! interaction with hardware and storage happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without a real
//! motor or filesystem.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
