//! File-backed configuration adapter.
//!
//! Implements [`ConfigPort`] over the 4-line pairing file. A missing file
//! maps to [`ConfigError::Absent`] so first boot is indistinguishable from
//! a fresh unpair; all other I/O faults are logged and collapsed into
//! [`ConfigError::Io`].

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;

use crate::app::ports::ConfigPort;
use crate::config::PairingRecord;
use crate::error::ConfigError;

/// Pairing record persisted as a small text file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for FileStore {
    fn load(&self) -> Result<PairingRecord, ConfigError> {
        let content = self.read_raw()?;
        PairingRecord::parse(&content)
    }

    fn save(&self, record: &PairingRecord) -> Result<(), ConfigError> {
        self.write_raw(&record.render())
    }

    fn read_raw(&self) -> Result<String, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ConfigError::Absent),
            Err(e) => {
                warn!("config read failed ({}): {}", self.path.display(), e);
                Err(ConfigError::Io)
            }
        }
    }

    fn write_raw(&self, content: &str) -> Result<(), ConfigError> {
        fs::write(&self.path, content).map_err(|e| {
            warn!("config write failed ({}): {}", self.path.display(), e);
            ConfigError::Io
        })
    }
}
