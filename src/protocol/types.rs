use core::str::FromStr;

use super::ConstPackedSizeBytes;
use crate::error::{BuildError, ParseError};

/// **STAMP Timestamp** - A 64-bit split timestamp: a 32-bit unsigned seconds
/// field and a 32-bit fraction field. The interpretation of both fields
/// depends on the [`TimestampFormat`] signalled by the `Z` flag of the
/// accompanying [`ErrorEstimate`]: NTP fractions resolve 1/2^32 of a second,
/// PTP fractions are nanoseconds.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Seconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Fraction                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp {
    /// Seconds since the format-specific epoch (32-bit unsigned).
    pub seconds: u32,
    /// Fractional seconds (32-bit unsigned; format-specific resolution).
    pub fraction: u32,
}

/// The timestamp representation carried in a packet, signalled on the wire
/// by the `Z` flag inside the Error Estimate.
///
/// Both builder and parser match exhaustively on this enum; an unsupported
/// format can only enter the system at the configuration boundary, where
/// [`TimestampFormat::from_str`] rejects it.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum TimestampFormat {
    /// Network Time Protocol (NTP) version 4 64-bit timestamp format
    /// (RFC 5905). Epoch 1900-01-01, fraction in 1/2^32 seconds.
    #[default]
    NtpV4 = 0,
    /// IEEE 1588v2 Precision Time Protocol (PTP) truncated 64-bit timestamp
    /// format. Fraction in nanoseconds.
    PtpV2 = 1,
}

impl TryFrom<u8> for TimestampFormat {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TimestampFormat::NtpV4),
            1 => Ok(TimestampFormat::PtpV2),
            _ => Err(()),
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = BuildError;

    /// Parse a configuration-level format name: `"ntp"` or `"ptp"`.
    ///
    /// Anything else fails with [`BuildError::UnsupportedTimestampFormat`]
    /// before any packet field is populated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ntp" => Ok(TimestampFormat::NtpV4),
            "ptp" => Ok(TimestampFormat::PtpV2),
            other => Err(BuildError::UnsupportedTimestampFormat(other.to_string())),
        }
    }
}

/// The `S` synchronization flag carried in the Error Estimate field.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum SyncFlag {
    /// No external source is used for clock synchronization.
    #[default]
    NoExtSync = 0,
    /// The clock generating the timestamp is synchronized to UTC using an
    /// external source (e.g. GPS hardware).
    ExtSync = 1,
}

impl TryFrom<u8> for SyncFlag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SyncFlag::NoExtSync),
            1 => Ok(SyncFlag::ExtSync),
            _ => Err(()),
        }
    }
}

impl From<bool> for SyncFlag {
    fn from(ext_source_sync: bool) -> Self {
        if ext_source_sync {
            SyncFlag::ExtSync
        } else {
            SyncFlag::NoExtSync
        }
    }
}

/// **Error Estimate** - Bit-packed clock-quality metadata attached to every
/// probe and reply (RFC 8762 Section 4.2.1).
///
/// ### Layout
///
/// ```ignore
///  0                   1
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |S|Z|   Scale   |   Multiplier  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ErrorEstimate {
    /// External-synchronization flag.
    pub sync: SyncFlag,
    /// Timestamp format flag (`Z`).
    pub format: TimestampFormat,
    /// Scale exponent, 6 bits on the wire.
    pub scale: u8,
    /// Error multiplier, default 1.
    pub multiplier: u8,
}

impl Default for ErrorEstimate {
    fn default() -> Self {
        ErrorEstimate {
            sync: SyncFlag::NoExtSync,
            format: TimestampFormat::NtpV4,
            scale: 0,
            multiplier: 1,
        }
    }
}

impl ErrorEstimate {
    /// Pack into the 16-bit wire word.
    ///
    /// Fails with [`ParseError::FieldOverflow`] if `scale` does not fit its
    /// 6-bit field; overflow is never silently wrapped.
    pub fn to_word(&self) -> Result<u16, ParseError> {
        if self.scale > 0x3F {
            return Err(ParseError::FieldOverflow {
                field: "scale",
                value: self.scale as u32,
            });
        }
        let mut word = 0u16;
        word |= (self.sync as u16) << 15;
        word |= (self.format as u16) << 14;
        word |= (self.scale as u16) << 8;
        word |= self.multiplier as u16;
        Ok(word)
    }

    /// Unpack from the 16-bit wire word. Every bit pattern is valid.
    pub fn from_word(word: u16) -> Self {
        let sync = if word >> 15 & 1 == 1 {
            SyncFlag::ExtSync
        } else {
            SyncFlag::NoExtSync
        };
        let format = if word >> 14 & 1 == 1 {
            TimestampFormat::PtpV2
        } else {
            TimestampFormat::NtpV4
        };
        ErrorEstimate {
            sync,
            format,
            scale: (word >> 8 & 0x3F) as u8,
            multiplier: (word & 0xFF) as u8,
        }
    }
}

/// **Test packet** - The probe a Session-Sender emits (RFC 8762 Section 4.2).
///
/// The 16-bit SSID is a non-RFC extension identifying the measurement
/// session, carried where the RFC places the leading MBZ padding.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Sequence Number                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                         Timestamp (64)                        +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         Error Estimate        |              SSID             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TestPacket {
    /// Sender-assigned sequence number, monotonically increasing per session.
    pub sequence_number: u32,
    /// Send timestamp, captured at build time.
    pub timestamp: Timestamp,
    /// The sender's clock-quality metadata.
    pub error_estimate: ErrorEstimate,
    /// Session Sender Identifier.
    pub ssid: u16,
}

/// **Reply packet** - The Session-Reflector's answer to a Test packet
/// (RFC 8762 Section 4.3).
///
/// The leading fields are the Reflector's own; the trailing echo block
/// (`sender_*`) is copied byte-for-byte from the received Test packet,
/// except the sender sequence number, which a stateless-mode Reflector may
/// override. The 16-bit MBZ word before the Sender TTL is written as zero
/// and ignored on decode.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Sequence Number                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                         Timestamp (64)                        +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         Error Estimate        |              SSID             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Receive Timestamp (64)                    +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                     Sender Sequence Number                    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Sender Timestamp (64)                     +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Sender Error Estimate     |              MBZ              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   Sender TTL  |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ReplyPacket {
    /// The Reflector's own sequence number.
    pub sequence_number: u32,
    /// The Reflector's send timestamp.
    pub timestamp: Timestamp,
    /// The Reflector's clock-quality metadata.
    pub error_estimate: ErrorEstimate,
    /// Session Sender Identifier.
    pub ssid: u16,
    /// Time the Test packet arrived at the Reflector.
    pub receive_timestamp: Timestamp,
    /// Echo of the Test packet's sequence number, unless overridden.
    pub sender_sequence_number: u32,
    /// Echo of the Test packet's send timestamp.
    pub sender_timestamp: Timestamp,
    /// Echo of the Test packet's Error Estimate.
    pub sender_error_estimate: ErrorEstimate,
    /// Hop limit of the Test packet as received by the Reflector.
    pub sender_ttl: u8,
}

// Size implementations.

impl ConstPackedSizeBytes for Timestamp {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for ErrorEstimate {
    const PACKED_SIZE_BYTES: usize = 2;
}

impl ConstPackedSizeBytes for TestPacket {
    const PACKED_SIZE_BYTES: usize = 4
        + Timestamp::PACKED_SIZE_BYTES
        + ErrorEstimate::PACKED_SIZE_BYTES
        + 2;
}

impl ConstPackedSizeBytes for ReplyPacket {
    // Own fields, receive timestamp, echo block, MBZ word, sender TTL.
    const PACKED_SIZE_BYTES: usize = TestPacket::PACKED_SIZE_BYTES
        + Timestamp::PACKED_SIZE_BYTES
        + 4
        + Timestamp::PACKED_SIZE_BYTES
        + ErrorEstimate::PACKED_SIZE_BYTES
        + 2
        + 1;
}
