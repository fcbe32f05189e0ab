//! Pairing configuration
//!
//! The single persisted record binding this actuator to one controller node.
//! Stored as plain text, four lines in fixed order:
//!
//! ```text
//! <paired address or "DEFAULTS">
//! <device id>
//! <salt>
//! <separator as text>
//! ```
//!
//! A missing file, an empty first line, or the `DEFAULTS` sentinel all mean
//! "unpaired, run on built-in defaults". Anything else that does not parse
//! into the 4-line shape is reported as [`ConfigError::Corrupt`]; callers
//! substitute defaults for both cases at startup.

use core::fmt;

use crate::error::ConfigError;

/// First-line sentinel marking an unpaired record.
pub const DEFAULTS_SENTINEL: &str = "DEFAULTS";

/// Field separator used on the wire until a pairing changes it.
pub const DEFAULT_SEPARATOR: &str = "%%%";

/// Upper bound on the separator token length.
pub const MAX_SEPARATOR_LEN: usize = 16;

/// The persisted pairing record.
///
/// Invariants: `paired == None` means any peer may connect; once paired,
/// `salt == device_id` (the salt is re-derived from the node-assigned id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRecord {
    /// Address of the one authorized controller node, if paired.
    pub paired: Option<String>,
    /// Device identifier assigned by the controller at pair time.
    pub device_id: String,
    /// Salt mixed into every command token.
    pub salt: String,
    /// Wire-level field separator.
    pub separator: heapless::String<MAX_SEPARATOR_LEN>,
}

impl Default for PairingRecord {
    fn default() -> Self {
        let mut separator = heapless::String::new();
        // DEFAULT_SEPARATOR is 3 bytes, well under MAX_SEPARATOR_LEN.
        let _ = separator.push_str(DEFAULT_SEPARATOR);
        Self {
            paired: None,
            device_id: "0".into(),
            salt: "0".into(),
            separator,
        }
    }
}

impl PairingRecord {
    /// Render the record into its 4-line persisted form.
    ///
    /// An unpaired record renders the `DEFAULTS` sentinel in line 1, which
    /// [`parse`](Self::parse) maps back to [`ConfigError::Absent`].
    pub fn render(&self) -> String {
        let paired = self.paired.as_deref().unwrap_or(DEFAULTS_SENTINEL);
        format!(
            "{paired}\n{id}\n{salt}\n{sep}\n",
            id = self.device_id,
            salt = self.salt,
            sep = self.separator,
        )
    }

    /// Parse the persisted 4-line form back into a record.
    ///
    /// Returns [`ConfigError::Absent`] for the sentinel / empty first line
    /// and [`ConfigError::Corrupt`] for any other malformed content (the
    /// partial-write case: a crash mid-save leaves fewer than 4 lines).
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut lines = content.lines();

        let first = lines.next().unwrap_or("").trim();
        if first.is_empty() || first == DEFAULTS_SENTINEL {
            return Err(ConfigError::Absent);
        }

        let device_id = lines.next().map(str::trim).ok_or(ConfigError::Corrupt)?;
        let salt = lines.next().map(str::trim).ok_or(ConfigError::Corrupt)?;
        let sep = lines.next().map(str::trim).ok_or(ConfigError::Corrupt)?;
        if device_id.is_empty() || salt.is_empty() || sep.is_empty() {
            return Err(ConfigError::Corrupt);
        }

        let mut separator = heapless::String::new();
        separator
            .push_str(sep)
            .map_err(|()| ConfigError::Corrupt)?;

        Ok(Self {
            paired: Some(first.to_owned()),
            device_id: device_id.to_owned(),
            salt: salt.to_owned(),
            separator,
        })
    }

    /// Whether the device is bound to a controller node.
    pub fn is_paired(&self) -> bool {
        self.paired.is_some()
    }
}

impl fmt::Display for PairingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paired={} id={} salt={} sep={:?}",
            self.paired.as_deref().unwrap_or("-"),
            self.device_id,
            self.salt,
            self.separator.as_str(),
        )
    }
}
