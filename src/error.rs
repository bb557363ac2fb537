// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for STAMP packet building, parsing, and transmission.
//!
//! [`ParseError`] covers the byte-level codec, [`BuildError`] the payload
//! builders, and [`StampError`] is the top-level kind a caller driving a
//! whole send path sees. None of these carry partial packets: a failed parse
//! or build returns only the error.

use core::fmt;
use std::io;

/// Errors that can occur while encoding or decoding a STAMP payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// A logical value does not fit the width of its wire field.
    FieldOverflow {
        /// Name of the overflowing field.
        field: &'static str,
        /// The out-of-range value.
        value: u32,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            ParseError::FieldOverflow { field, value } => {
                write!(f, "{} value {} exceeds its wire width", field, value)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> io::Error {
        let kind = match &err {
            ParseError::BufferTooShort { .. } => io::ErrorKind::UnexpectedEof,
            ParseError::FieldOverflow { .. } => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

/// Errors that can occur while building a Test or Reply payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The caller requested a timestamp format other than `"ntp"` or `"ptp"`.
    UnsupportedTimestampFormat(String),
    /// The received Test payload could not be decoded, or a field could not
    /// be encoded.
    MalformedPacket(ParseError),
    /// The segment list was empty, so no destination address can be derived.
    EmptySegmentList,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnsupportedTimestampFormat(requested) => {
                write!(f, "unsupported timestamp format: {:?}", requested)
            }
            BuildError::MalformedPacket(err) => write!(f, "malformed packet: {}", err),
            BuildError::EmptySegmentList => write!(f, "segment list is empty"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::MalformedPacket(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for BuildError {
    fn from(err: ParseError) -> BuildError {
        BuildError::MalformedPacket(err)
    }
}

/// Top-level error type for callers driving a full build-and-send path.
#[derive(Debug)]
pub enum StampError {
    /// Payload construction failed.
    Build(BuildError),
    /// Payload decoding failed.
    Parse(ParseError),
    /// The external transport sink rejected a send. The codec never
    /// generates this itself; it only propagates the sink's failure.
    TransportUnavailable(io::Error),
}

impl fmt::Display for StampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampError::Build(err) => write!(f, "{}", err),
            StampError::Parse(err) => write!(f, "{}", err),
            StampError::TransportUnavailable(err) => {
                write!(f, "transport unavailable: {}", err)
            }
        }
    }
}

impl std::error::Error for StampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StampError::Build(err) => Some(err),
            StampError::Parse(err) => Some(err),
            StampError::TransportUnavailable(err) => Some(err),
        }
    }
}

impl From<BuildError> for StampError {
    fn from(err: BuildError) -> StampError {
        StampError::Build(err)
    }
}

impl From<ParseError> for StampError {
    fn from(err: ParseError) -> StampError {
        StampError::Parse(err)
    }
}
