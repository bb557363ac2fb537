// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! STAMP probe packet types, wire codec, and builders.
//!
//! This crate provides the packet encoding and decoding logic for the Simple
//! Two-way Active Measurement Protocol (RFC 8762) as carried over UDP inside
//! SRv6-encapsulated IPv6. It covers both STAMP roles: the Session-Sender,
//! which emits Test packets carrying a sequence number, send timestamp, and
//! Error Estimate metadata; and the Session-Reflector, which answers with
//! Reply packets echoing the sender's fields next to its own receive and send
//! timestamps.
//!
//! The codec is a pure, stateless transform between structured records and
//! payload bytes. Sockets, IPv6/Segment-Routing header construction, and
//! session scheduling belong to the surrounding system; the [`builder`]
//! module hands back the addressing values ([`srv6::TransmitHints`]) those
//! outer layers need, and the [`transport`] module defines the opaque sink
//! they are reached through.

#![warn(missing_docs)]

/// Custom error types for packet building, parsing, and transmission.
pub mod error;

/// STAMP wire records and byte-level codecs.
pub mod protocol;

/// Wall-clock capture and NTP/PTP 64-bit timestamp conversion.
pub mod timestamp;

/// Segment-list derivation for the SRv6 transport headers.
pub mod srv6;

/// Test and Reply payload builders.
pub mod builder;

/// Test and Reply payload parsers.
pub mod parser;

/// The opaque transmission seam between the codec and the network.
pub mod transport;
