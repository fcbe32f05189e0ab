//! ShutterLink firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. Everything here is host-runnable; the device build wires
//! the same traits to real relay GPIO behind the adapter seam.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod net;
pub mod rpc;

pub mod adapters;
pub mod error;
