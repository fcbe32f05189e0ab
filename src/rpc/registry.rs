//! Salted token registry — maps wire tokens to commands.
//!
//! Clients select a command by sending `hex(sha256(name ++ salt))` instead
//! of the bare name, so casual sniffing of one request does not reveal the
//! command vocabulary. This is obfuscation, not authentication: the salt is
//! the node-assigned device id, not a secret (documented trade-off carried
//! from the protocol; a PSK layer would sit below this, not replace it).
//!
//! The table is regenerated wholesale on every salt change — entries are
//! never patched individually, so a stale token can never linger.
//!
//! Crypto is handled by the `hmac-sha256` crate's plain `Hash` — pure Rust,
//! no_std, identical on every target.

use log::debug;

use crate::app::commands::CommandKind;

/// Compute the wire token for one command under `salt`.
///
/// Also used by test code and client tooling to derive request tokens.
pub fn token_for(kind: CommandKind, salt: &str) -> String {
    let mut h = hmac_sha256::Hash::new();
    h.update(kind.wire_name().as_bytes());
    h.update(salt.as_bytes());
    hex::encode(h.finalize())
}

/// Fixed-size token table, one slot per [`CommandKind`].
pub struct ActionRegistry {
    tokens: [String; CommandKind::COUNT],
}

impl ActionRegistry {
    /// Build the table for `salt`.
    pub fn new(salt: &str) -> Self {
        let mut registry = Self {
            tokens: core::array::from_fn(|_| String::new()),
        };
        registry.rebuild(salt);
        registry
    }

    /// Regenerate every token for a new salt.
    pub fn rebuild(&mut self, salt: &str) {
        for (slot, kind) in self.tokens.iter_mut().zip(CommandKind::ALL) {
            *slot = token_for(kind, salt);
            debug!("token {}  {}", slot, kind.wire_name());
        }
    }

    /// Resolve a wire token by exact equality. No prefix or fuzzy match.
    pub fn resolve(&self, token: &str) -> Option<CommandKind> {
        self.tokens
            .iter()
            .zip(CommandKind::ALL)
            .find(|(t, _)| t.as_str() == token)
            .map(|(_, kind)| kind)
    }
}
