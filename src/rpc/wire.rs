//! Separator-split request codec.
//!
//! Wire format (request, client → device):
//!
//! ```text
//! ┌───────────┬─────┬────────┬─────┬────────┐
//! │ token hex │ SEP │ arg 1  │ SEP │ arg N  │
//! └───────────┴─────┴────────┴─────┴────────┘
//! ```
//!
//! Field 0 is the salted command token; the rest are UTF-8 text arguments.
//! Every field is trimmed of ASCII whitespace (clients habitually send a
//! trailing newline). One read chunk is one request — there is no
//! cross-read reassembly in this protocol.

use crate::error::ProtocolError;

/// Fixed read chunk size for a single request.
pub const READ_CHUNK: usize = 1024;

/// A decoded request, borrowing from the read buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct Request<'a> {
    /// Field 0 — the salted command token.
    pub token: &'a str,
    /// Fields 1..N — text arguments.
    pub args: Vec<&'a str>,
}

/// Split `payload` on the separator and decode each field as trimmed UTF-8.
pub fn decode<'a>(payload: &'a [u8], separator: &[u8]) -> Result<Request<'a>, ProtocolError> {
    let mut fields = Vec::new();
    for raw in split_on(payload, separator) {
        let field = core::str::from_utf8(raw)
            .map_err(|_| ProtocolError::BadEncoding)?
            .trim();
        fields.push(field);
    }

    let (&token, args) = fields
        .split_first()
        .ok_or(ProtocolError::EmptyRequest)?;
    if token.is_empty() && args.is_empty() {
        return Err(ProtocolError::EmptyRequest);
    }

    Ok(Request {
        token,
        args: args.to_vec(),
    })
}

/// Split on a multi-byte separator. A degenerate empty separator yields the
/// whole payload as one field.
fn split_on<'a>(payload: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    if sep.is_empty() {
        return vec![payload];
    }

    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + sep.len() <= payload.len() {
        if &payload[i..i + sep.len()] == sep {
            out.push(&payload[start..i]);
            i += sep.len();
            start = i;
        } else {
            i += 1;
        }
    }
    out.push(&payload[start..]);
    out
}
