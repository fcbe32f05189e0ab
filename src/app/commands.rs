//! The fixed command set and its argument parsing.
//!
//! Clients never send command names — they send a token derived from the
//! name and the current salt (see [`crate::rpc::registry`]). Once the token
//! resolves to a [`CommandKind`], the remaining request fields are parsed
//! into a fully-typed [`Command`], so every handler downstream works with
//! checked data instead of raw strings.

use crate::app::state::Direction;
use crate::error::ArgumentError;

/// Identity of a supported command. This set is closed; the registry holds
/// exactly one token per variant at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Pair,
    Unpair,
    Roll,
    RollStatus,
}

impl CommandKind {
    /// Number of supported commands — sizes the token table.
    pub const COUNT: usize = 4;

    /// All commands in token-table order.
    pub const ALL: [Self; Self::COUNT] = [Self::Pair, Self::Unpair, Self::Roll, Self::RollStatus];

    /// The name hashed together with the salt to form the wire token.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Unpair => "unpair",
            Self::Roll => "roll",
            Self::RollStatus => "rollstatus",
        }
    }
}

/// Longest accepted pairing address (fits any textual IP, with headroom
/// for a hostname).
pub const MAX_ADDRESS_LEN: usize = 64;

/// Longest accepted device id (doubles as the salt and a config line).
pub const MAX_DEVICE_ID_LEN: usize = 32;

/// A fully-parsed command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bind the actuator to a controller node (persistent).
    Pair { address: String, device_id: String },
    /// Open the temporary unpair window.
    Unpair,
    /// Move the shutter for a bounded number of seconds.
    Roll { direction: Direction, seconds: u64 },
    /// Query the (best-effort) shutter position.
    RollStatus,
}

impl Command {
    /// Parse the request arguments for `kind`.
    ///
    /// Arity follows the source protocol: exactly the leading arguments are
    /// consumed, surplus fields are ignored.
    pub fn parse(kind: CommandKind, args: &[&str]) -> Result<Self, ArgumentError> {
        match kind {
            CommandKind::Pair => {
                let [address, device_id, ..] = args else {
                    return Err(ArgumentError::MissingArguments);
                };
                // Both fields are echoed into the fixed-capacity response
                // and written as single config lines; bound them here.
                if address.len() > MAX_ADDRESS_LEN || device_id.len() > MAX_DEVICE_ID_LEN {
                    return Err(ArgumentError::OversizedArgument);
                }
                Ok(Self::Pair {
                    address: (*address).to_owned(),
                    device_id: (*device_id).to_owned(),
                })
            }
            CommandKind::Unpair => Ok(Self::Unpair),
            CommandKind::Roll => {
                let [direction, duration, ..] = args else {
                    return Err(ArgumentError::MissingArguments);
                };
                let direction =
                    Direction::parse(direction).ok_or(ArgumentError::BadDirection)?;
                let seconds: u64 = duration
                    .parse()
                    .map_err(|_| ArgumentError::BadDuration)?;
                if seconds == 0 {
                    return Err(ArgumentError::BadDuration);
                }
                Ok(Self::Roll { direction, seconds })
            }
            CommandKind::RollStatus => Ok(Self::RollStatus),
        }
    }
}

/// Out-of-band urgent request, raised from interrupt context (limit switch,
/// emergency-stop input) and consumed with strict priority by the control
/// loop before any deadline or socket work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptRequest {
    /// Cut motor power immediately.
    Stop,
    /// Start a movement without a network round-trip.
    Roll { direction: Direction, seconds: u64 },
    /// Open the unpair window (e.g. a physical reset button).
    Unpair,
}
