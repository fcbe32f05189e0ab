//! Unified error types for the ShutterLink firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the control loop's error handling uniform. Each
//! failure class carries its own recovery policy:
//!
//! - [`ProtocolError`] — answered with the generic `"keine action\n"` line,
//!   connection stays open.
//! - [`ArgumentError`] — answered with a specific human-readable line inside
//!   the command handler, no state mutation.
//! - [`TransportError`] — connection-fatal: the peer is evicted, the loop
//!   keeps serving everyone else.
//! - [`ConfigError`] — recovered at startup by substituting defaults; never
//!   surfaced to a client.
//!
//! All variants are `Copy` so they pass through the control loop without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The request could not be mapped to a command.
    Protocol(ProtocolError),
    /// A command was resolved but its arguments are unusable.
    Argument(ArgumentError),
    /// A socket operation failed.
    Transport(TransportError),
    /// The persisted pairing record is absent or unusable.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "protocol: {e}"),
            Self::Argument(e) => write!(f, "argument: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol errors (recoverable, generic response)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload was empty after separator splitting and trimming.
    EmptyRequest,
    /// A request field is not valid UTF-8.
    BadEncoding,
    /// The token in field 0 matches no registered command.
    UnknownToken,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRequest => write!(f, "empty request"),
            Self::BadEncoding => write!(f, "field is not valid UTF-8"),
            Self::UnknownToken => write!(f, "unknown command token"),
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

// ---------------------------------------------------------------------------
// Argument errors (recoverable, specific response, no state change)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// Fewer arguments than the command's fixed arity.
    MissingArguments,
    /// Movement direction is neither `up` nor `down`.
    BadDirection,
    /// Duration does not parse as a positive integer number of seconds.
    BadDuration,
    /// A text argument exceeds its fixed length bound.
    OversizedArgument,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArguments => write!(f, "missing arguments"),
            Self::BadDirection => write!(f, "bad direction"),
            Self::BadDuration => write!(f, "bad duration"),
            Self::OversizedArgument => write!(f, "argument too long"),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Self::Argument(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors (connection-fatal)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The peer closed the stream (empty read).
    ClosedByPeer,
    /// A read returned a hard error.
    ReadFailed,
    /// A response write returned a hard error.
    WriteFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedByPeer => write!(f, "closed by peer"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::WriteFailed => write!(f, "write failed"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors (recovered at startup with defaults)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No file, an empty first line, or the `DEFAULTS` sentinel.
    Absent,
    /// The file exists but does not have the expected 4-line shape.
    Corrupt,
    /// The storage backend failed to read or write.
    Io,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "no pairing record present"),
            Self::Corrupt => write!(f, "pairing record corrupt"),
            Self::Io => write!(f, "storage I/O error"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
