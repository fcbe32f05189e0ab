//! ShutterLink firmware — main entry point.
//!
//! Hexagonal architecture with a single-task event loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  RelayShutterDriver  FileStore    LogEventSink  SystemClock│
//! │  (DrivePort)         (ConfigPort) (EventSink)   (Clock)    │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────        │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │           ActuatorService (pure logic)           │      │
//! │  │  token registry · pairing record · movement FSM  │      │
//! │  └──────────────────────────────────────────────────┘      │
//! │                                                            │
//! │  ConnectionManager (admission) · control loop (net::run)   │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::net::SocketAddr;

use anyhow::Result;
use log::{info, warn};

use shutterlink::adapters::file_store::FileStore;
use shutterlink::adapters::log_sink::LogEventSink;
use shutterlink::adapters::shutter::RelayShutterDriver;
use shutterlink::adapters::time::SystemClock;
use shutterlink::app::events::AppEvent;
use shutterlink::app::ports::{ConfigPort, EventSink};
use shutterlink::app::service::ActuatorService;
use shutterlink::config::PairingRecord;
use shutterlink::error::ConfigError;
use shutterlink::net::conn::ConnectionManager;

/// Pairing file next to the binary (flash filesystem root on the device).
const CONFIG_PATH: &str = "shutterlink.cfg";

/// TCP command port.
const LISTEN_PORT: u16 = 8080;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  ShutterLink v{}                   ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 1. Load the pairing record (or defaults) ──────────────
    let store = FileStore::new(CONFIG_PATH);
    let record = match store.load() {
        Ok(record) => {
            info!("config loaded: {}", record);
            record
        }
        Err(ConfigError::Absent) => {
            info!("no pairing on file, starting with defaults");
            PairingRecord::default()
        }
        Err(e) => {
            warn!("config unusable ({}), starting with defaults", e);
            PairingRecord::default()
        }
    };

    // ── 2. Construct adapters ─────────────────────────────────
    let mut hw = RelayShutterDriver::new();
    let mut sink = LogEventSink::new();
    let clock = SystemClock::new();

    // ── 3. Construct the service ──────────────────────────────
    let paired = record.is_paired();
    let service = ActuatorService::new(record);
    sink.emit(&AppEvent::Started { paired });

    // ── 4. Bind and run ───────────────────────────────────────
    let conns = ConnectionManager::bind(SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT)))?;
    info!("listening on {}", conns.local_addr()?);

    futures_lite::future::block_on(shutterlink::net::run(
        conns,
        service,
        &mut hw,
        &store,
        &mut sink,
        &clock,
    ));

    unreachable!("control loop never returns")
}
