//! Mock port adapters for integration tests.
//!
//! Records every motor call and keeps the config in memory so tests can
//! assert on full command histories and exact persisted bytes.

use std::cell::{Cell, RefCell};

use shutterlink::app::events::AppEvent;
use shutterlink::app::ports::{ConfigPort, DrivePort, EventSink};
use shutterlink::app::state::Direction;
use shutterlink::config::PairingRecord;
use shutterlink::error::ConfigError;

// ── Motor call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCall {
    Drive(Direction),
    Stop,
}

pub struct MockDrive {
    pub calls: Vec<DriveCall>,
    driving: bool,
}

#[allow(dead_code)]
impl MockDrive {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            driving: false,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == DriveCall::Stop).count()
    }

    pub fn last_call(&self) -> Option<&DriveCall> {
        self.calls.last()
    }
}

impl Default for MockDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl DrivePort for MockDrive {
    fn drive(&mut self, direction: Direction) {
        self.calls.push(DriveCall::Drive(direction));
        self.driving = true;
    }

    fn stop(&mut self) {
        self.calls.push(DriveCall::Stop);
        self.driving = false;
    }

    fn is_driving(&self) -> bool {
        self.driving
    }
}

// ── MemoryStore ───────────────────────────────────────────────

/// In-memory [`ConfigPort`]. `None` models a missing file; `fail_writes`
/// simulates a storage fault on the next write.
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    pub fail_writes: Cell<bool>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            content: RefCell::new(None),
            fail_writes: Cell::new(false),
        }
    }

    pub fn with_record(record: &PairingRecord) -> Self {
        Self {
            content: RefCell::new(Some(record.render())),
            fail_writes: Cell::new(false),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.content.borrow().clone()
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<PairingRecord, ConfigError> {
        match &*self.content.borrow() {
            Some(content) => PairingRecord::parse(content),
            None => Err(ConfigError::Absent),
        }
    }

    fn save(&self, record: &PairingRecord) -> Result<(), ConfigError> {
        self.write_raw(&record.render())
    }

    fn read_raw(&self) -> Result<String, ConfigError> {
        self.content.borrow().clone().ok_or(ConfigError::Absent)
    }

    fn write_raw(&self, content: &str) -> Result<(), ConfigError> {
        if self.fail_writes.get() {
            return Err(ConfigError::Io);
        }
        *self.content.borrow_mut() = Some(content.to_owned());
        Ok(())
    }
}

// ── SinkSpy ───────────────────────────────────────────────────

pub struct SinkSpy {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl SinkSpy {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, matcher: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matcher(e)).count()
    }
}

impl Default for SinkSpy {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SinkSpy {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
