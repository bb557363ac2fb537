// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Construction of fully encoded STAMP Test and Reply payloads.
//!
//! [`TestBuilder`] and [`ReplyBuilder`] follow the chained-setter pattern:
//! required addressing and session inputs go into `new()`, everything else
//! has a default matching the protocol's conventions (NTP format, no
//! external sync, multiplier 1, no padding). `build()` captures the
//! timestamp, encodes per the wire layout, and returns the payload bytes
//! together with the [`TransmitHints`] the external transport needs.
//!
//! The [`build_test`] and [`build_reply`] free functions cover callers that
//! carry the timestamp format as a configuration string; an unrecognized
//! string fails with [`BuildError::UnsupportedTimestampFormat`] before any
//! field is populated.

use std::net::Ipv6Addr;

use crate::error::BuildError;
use crate::parser::parse_test;
use crate::protocol::{
    ConstPackedSizeBytes, ErrorEstimate, ReplyPacket, SyncFlag, TestPacket, Timestamp,
    TimestampFormat, ToBytes, PORT,
};
use crate::srv6::TransmitHints;
use crate::timestamp::Instant;

/// Encode a packet into a fresh buffer, zero-padded to `pad_to` bytes if
/// that exceeds the packed size. Padding decodes as ignored on the far side.
fn encode<P: ToBytes + ConstPackedSizeBytes>(packet: &P, pad_to: usize) -> Result<Vec<u8>, BuildError> {
    let len = P::PACKED_SIZE_BYTES.max(pad_to);
    let mut buf = vec![0u8; len];
    packet.to_bytes(&mut buf)?;
    Ok(buf)
}

/// Builder for STAMP Test packet payloads (Session-Sender side).
#[derive(Clone, Debug)]
pub struct TestBuilder {
    src_ip: Ipv6Addr,
    segment_list: Vec<Ipv6Addr>,
    ssid: u16,
    src_port: u16,
    dst_port: u16,
    sequence_number: u32,
    format: TimestampFormat,
    sync: SyncFlag,
    scale: u8,
    multiplier: u8,
    pad_to: usize,
}

impl TestBuilder {
    /// Create a builder for a probe toward the given segment list.
    ///
    /// Defaults: both UDP ports set to the STAMP port (862), sequence number
    /// 0, NTP timestamps, no external sync, scale 0, multiplier 1, no
    /// padding.
    pub fn new(src_ip: Ipv6Addr, segment_list: Vec<Ipv6Addr>, ssid: u16) -> Self {
        TestBuilder {
            src_ip,
            segment_list,
            ssid,
            src_port: PORT,
            dst_port: PORT,
            sequence_number: 0,
            format: TimestampFormat::NtpV4,
            sync: SyncFlag::NoExtSync,
            scale: 0,
            multiplier: 1,
            pad_to: 0,
        }
    }

    /// Set the UDP source port.
    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    /// Set the UDP destination port.
    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    /// Set the probe's sequence number.
    pub fn sequence_number(mut self, sequence_number: u32) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Select the timestamp format; sets the `Z` flag accordingly.
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }

    /// Declare whether the sender clock is synchronized to an external
    /// source; sets the `S` flag.
    pub fn external_sync(mut self, ext_source_sync: bool) -> Self {
        self.sync = SyncFlag::from(ext_source_sync);
        self
    }

    /// Set the Error Estimate scale exponent (6 bits).
    pub fn scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    /// Set the Error Estimate multiplier.
    pub fn multiplier(mut self, multiplier: u8) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Zero-pad the payload to at least `len` bytes.
    pub fn pad_to(mut self, len: usize) -> Self {
        self.pad_to = len;
        self
    }

    /// Capture the send timestamp and encode the Test payload.
    pub fn build(&self) -> Result<(Vec<u8>, TransmitHints), BuildError> {
        let hints =
            TransmitHints::derive(self.src_ip, &self.segment_list, self.src_port, self.dst_port)?;

        let packet = TestPacket {
            sequence_number: self.sequence_number,
            timestamp: Timestamp::from_instant(Instant::now(), self.format),
            error_estimate: ErrorEstimate {
                sync: self.sync,
                format: self.format,
                scale: self.scale,
                multiplier: self.multiplier,
            },
            ssid: self.ssid,
        };

        log::debug!(
            "built Test packet: ssid={} seq={} format={:?}",
            self.ssid,
            self.sequence_number,
            self.format
        );
        let payload = encode(&packet, self.pad_to)?;
        Ok((payload, hints))
    }
}

/// Builder for STAMP Reply packet payloads (Session-Reflector side).
///
/// Parses the received Test payload first and fails on malformed input; the
/// echo block of the Reply is copied byte-for-byte from the parsed packet.
#[derive(Clone, Debug)]
pub struct ReplyBuilder<'a> {
    received: &'a [u8],
    src_ip: Ipv6Addr,
    segment_list: Vec<Ipv6Addr>,
    ssid: u16,
    src_port: u16,
    dst_port: u16,
    sequence_number: u32,
    format: TimestampFormat,
    sync: SyncFlag,
    scale: u8,
    multiplier: u8,
    pad_to: usize,
    sender_sequence_number: Option<u32>,
    received_at: Option<Instant>,
    sender_ttl: u8,
}

impl<'a> ReplyBuilder<'a> {
    /// Create a builder for the reply to `received`, routed back over the
    /// given segment list.
    ///
    /// Defaults match [`TestBuilder::new`], plus: the echoed sender sequence
    /// number is taken from the received packet, the Receive Timestamp
    /// reuses the send-time capture, and the Sender TTL is 0.
    pub fn new(
        received: &'a [u8],
        src_ip: Ipv6Addr,
        segment_list: Vec<Ipv6Addr>,
        ssid: u16,
    ) -> Self {
        ReplyBuilder {
            received,
            src_ip,
            segment_list,
            ssid,
            src_port: PORT,
            dst_port: PORT,
            sequence_number: 0,
            format: TimestampFormat::NtpV4,
            sync: SyncFlag::NoExtSync,
            scale: 0,
            multiplier: 1,
            pad_to: 0,
            sender_sequence_number: None,
            received_at: None,
            sender_ttl: 0,
        }
    }

    /// Set the UDP source port.
    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    /// Set the UDP destination port.
    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    /// Set the Reflector's own sequence number.
    pub fn sequence_number(mut self, sequence_number: u32) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Select the timestamp format for the Reflector's timestamps.
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }

    /// Declare whether the Reflector clock is synchronized to an external
    /// source.
    pub fn external_sync(mut self, ext_source_sync: bool) -> Self {
        self.sync = SyncFlag::from(ext_source_sync);
        self
    }

    /// Set the Error Estimate scale exponent (6 bits).
    pub fn scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    /// Set the Error Estimate multiplier.
    pub fn multiplier(mut self, multiplier: u8) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Zero-pad the payload to at least `len` bytes.
    pub fn pad_to(mut self, len: usize) -> Self {
        self.pad_to = len;
        self
    }

    /// Override the echoed sender sequence number instead of copying it from
    /// the received Test packet. Supports stateless-mode Reflectors that run
    /// their own numbering without per-session state.
    pub fn sender_sequence_number(mut self, sequence_number: u32) -> Self {
        self.sender_sequence_number = Some(sequence_number);
        self
    }

    /// Supply the instant the Test packet actually arrived, to be carried as
    /// the Receive Timestamp. Without this the Receive Timestamp reuses the
    /// send-time capture, which biases processing-delay measurements by the
    /// Reflector's turnaround time.
    pub fn received_at(mut self, at: Instant) -> Self {
        self.received_at = Some(at);
        self
    }

    /// Supply the hop limit the Test packet arrived with.
    pub fn sender_ttl(mut self, ttl: u8) -> Self {
        self.sender_ttl = ttl;
        self
    }

    /// Parse the received Test payload, capture the Reflector timestamps,
    /// and encode the Reply payload.
    pub fn build(&self) -> Result<(Vec<u8>, TransmitHints), BuildError> {
        let test = parse_test(self.received)?;

        let hints =
            TransmitHints::derive(self.src_ip, &self.segment_list, self.src_port, self.dst_port)?;

        let timestamp = Timestamp::from_instant(Instant::now(), self.format);
        let receive_timestamp = match self.received_at {
            Some(at) => Timestamp::from_instant(at, self.format),
            None => timestamp,
        };

        let packet = ReplyPacket {
            sequence_number: self.sequence_number,
            timestamp,
            error_estimate: ErrorEstimate {
                sync: self.sync,
                format: self.format,
                scale: self.scale,
                multiplier: self.multiplier,
            },
            ssid: self.ssid,
            receive_timestamp,
            sender_sequence_number: self
                .sender_sequence_number
                .unwrap_or(test.sequence_number),
            sender_timestamp: test.timestamp,
            sender_error_estimate: test.error_estimate,
            sender_ttl: self.sender_ttl,
        };

        log::debug!(
            "built Reply packet: ssid={} seq={} echoing sender seq={}",
            self.ssid,
            self.sequence_number,
            packet.sender_sequence_number
        );
        let payload = encode(&packet, self.pad_to)?;
        Ok((payload, hints))
    }
}

/// Generate a STAMP Test packet payload and its transmit hints.
///
/// `timestamp_format` is the configuration-level name of the format, either
/// `"ntp"` or `"ptp"`; anything else fails with
/// [`BuildError::UnsupportedTimestampFormat`] and produces no payload.
#[allow(clippy::too_many_arguments)]
pub fn build_test(
    src_ip: Ipv6Addr,
    segment_list: &[Ipv6Addr],
    src_port: u16,
    dst_port: u16,
    ssid: u16,
    sequence_number: u32,
    timestamp_format: &str,
    ext_source_sync: bool,
    scale: u8,
    multiplier: u8,
) -> Result<(Vec<u8>, TransmitHints), BuildError> {
    let format: TimestampFormat = timestamp_format.parse()?;
    TestBuilder::new(src_ip, segment_list.to_vec(), ssid)
        .src_port(src_port)
        .dst_port(dst_port)
        .sequence_number(sequence_number)
        .timestamp_format(format)
        .external_sync(ext_source_sync)
        .scale(scale)
        .multiplier(multiplier)
        .build()
}

/// Generate a STAMP Reply packet payload for a received Test payload.
///
/// The echo block is copied from the parsed Test packet; pass
/// `sender_sequence_number` to override the echoed number for stateless
/// mode. Fails with [`BuildError::MalformedPacket`] if `received` cannot be
/// decoded.
#[allow(clippy::too_many_arguments)]
pub fn build_reply(
    received: &[u8],
    src_ip: Ipv6Addr,
    segment_list: &[Ipv6Addr],
    src_port: u16,
    dst_port: u16,
    ssid: u16,
    sequence_number: u32,
    timestamp_format: &str,
    ext_source_sync: bool,
    scale: u8,
    multiplier: u8,
    sender_sequence_number: Option<u32>,
) -> Result<(Vec<u8>, TransmitHints), BuildError> {
    let format: TimestampFormat = timestamp_format.parse()?;
    let mut builder = ReplyBuilder::new(received, src_ip, segment_list.to_vec(), ssid)
        .src_port(src_port)
        .dst_port(dst_port)
        .sequence_number(sequence_number)
        .timestamp_format(format)
        .external_sync(ext_source_sync)
        .scale(scale)
        .multiplier(multiplier);
    if let Some(seq) = sender_sequence_number {
        builder = builder.sender_sequence_number(seq);
    }
    builder.build()
}
