//! Decoding of received STAMP payloads into structured records.
//!
//! Both parsers check the minimum payload width up front and return only the
//! error on failure, never a partial record. Bytes past the packed size are
//! treated as padding and ignored. To turn decoded timestamps into real
//! seconds, use the `*_secs` helpers on the records, which branch on each
//! packet's decoded `Z` flag (see [`crate::timestamp`]).

use crate::error::ParseError;
use crate::protocol::{FromBytes, ReplyPacket, TestPacket};

/// Parse a STAMP Test payload received from a Session-Sender.
///
/// Fails with [`ParseError::BufferTooShort`] if the payload is shorter than
/// the fixed Test packet width.
pub fn parse_test(payload: &[u8]) -> Result<TestPacket, ParseError> {
    let (packet, _) = TestPacket::from_bytes(payload)?;
    Ok(packet)
}

/// Parse a STAMP Reply payload received from a Session-Reflector, including
/// the embedded sender echo block.
///
/// Fails with [`ParseError::BufferTooShort`] if the payload is shorter than
/// the fixed Reply packet width.
pub fn parse_reply(payload: &[u8]) -> Result<ReplyPacket, ParseError> {
    let (packet, _) = ReplyPacket::from_bytes(payload)?;
    Ok(packet)
}
