//! Types and constants that precisely match the STAMP wire layout.
//!
//! Provides `ReadBytes` and `WriteBytes` implementations which extend the
//! byteorder crate `WriteBytesExt` and `ReadBytesExt` traits with the ability
//! to read and write STAMP protocol types, alongside slice-based `FromBytes`
//! and `ToBytes` codecs.
//!
//! Field layout follows RFC 8762 Section 4.2 for the unauthenticated packet
//! formats, with the 16-bit SSID extension carried after the Error Estimate.

/// STAMP Session-Reflector UDP port number (RFC 8762).
pub const PORT: u16 = 862;

mod bytes;
mod io;
mod traits;
mod types;

pub use self::traits::*;
pub use self::types::*;
