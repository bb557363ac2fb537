//! Derivation of the addressing values the external transport layer needs
//! to place a STAMP payload on an SRv6 path.
//!
//! The codec does not build IPv6 or Segment Routing headers itself. It only
//! computes, from the caller's segment list, the exact values those headers
//! must carry: the outer destination address is the first segment, the SRH
//! address list is the segment list in reverse, and both `segments_left` and
//! `last_entry` equal the list length minus one.

use std::net::Ipv6Addr;

use crate::error::{BuildError, ParseError};

/// Addressing values for the outer IPv6/SRH/UDP headers of one packet.
///
/// Handed to the external transport gateway together with the payload bytes;
/// see [`crate::transport::PacketSink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransmitHints {
    /// Source address of the outer IPv6 header.
    pub src: Ipv6Addr,
    /// Destination address of the outer IPv6 header (the first segment).
    pub destination: Ipv6Addr,
    /// SRH address list: the caller's segment list in reverse order.
    pub segments: Vec<Ipv6Addr>,
    /// SRH Segments Left field.
    pub segments_left: u8,
    /// SRH Last Entry field.
    pub last_entry: u8,
    /// UDP source port.
    pub src_port: u16,
    /// UDP destination port.
    pub dst_port: u16,
}

impl TransmitHints {
    /// Derive the transmit hints for the given segment list and ports.
    ///
    /// Fails with [`BuildError::EmptySegmentList`] if `segment_list` is
    /// empty, since no destination address exists, and with
    /// [`BuildError::MalformedPacket`] if the list is too long for the
    /// 8-bit `segments_left`/`last_entry` SRH fields.
    pub fn derive(
        src: Ipv6Addr,
        segment_list: &[Ipv6Addr],
        src_port: u16,
        dst_port: u16,
    ) -> Result<TransmitHints, BuildError> {
        let destination = *segment_list.first().ok_or(BuildError::EmptySegmentList)?;
        let last = segment_list.len() - 1;
        if last > u8::MAX as usize {
            return Err(ParseError::FieldOverflow {
                field: "segments_left",
                value: last as u32,
            }
            .into());
        }
        let segments: Vec<Ipv6Addr> = segment_list.iter().rev().copied().collect();
        let segments_left = last as u8;
        Ok(TransmitHints {
            src,
            destination,
            segments,
            segments_left,
            last_entry: segments_left,
            src_port,
            dst_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Ipv6Addr {
        s.parse().unwrap()
    }

    #[test]
    fn three_segment_derivation() {
        let sids = [addr("2001:db8::a"), addr("2001:db8::b"), addr("2001:db8::c")];
        let hints = TransmitHints::derive(addr("2001:db8::1"), &sids, 20000, 862).unwrap();
        assert_eq!(hints.destination, addr("2001:db8::a"));
        assert_eq!(
            hints.segments,
            vec![addr("2001:db8::c"), addr("2001:db8::b"), addr("2001:db8::a")]
        );
        assert_eq!(hints.segments_left, 2);
        assert_eq!(hints.last_entry, 2);
    }

    #[test]
    fn single_segment_derivation() {
        let sids = [addr("2001:db8::a")];
        let hints = TransmitHints::derive(addr("2001:db8::1"), &sids, 20000, 862).unwrap();
        assert_eq!(hints.destination, addr("2001:db8::a"));
        assert_eq!(hints.segments, vec![addr("2001:db8::a")]);
        assert_eq!(hints.segments_left, 0);
        assert_eq!(hints.last_entry, 0);
    }

    #[test]
    fn empty_segment_list_fails() {
        let err = TransmitHints::derive(addr("2001:db8::1"), &[], 20000, 862).unwrap_err();
        assert_eq!(err, BuildError::EmptySegmentList);
    }

    #[test]
    fn maximum_segment_list_derivation() {
        let sids = vec![addr("2001:db8::a"); 256];
        let hints = TransmitHints::derive(addr("2001:db8::1"), &sids, 20000, 862).unwrap();
        assert_eq!(hints.segments_left, 255);
        assert_eq!(hints.last_entry, 255);
    }

    #[test]
    fn oversized_segment_list_fails() {
        let sids = vec![addr("2001:db8::a"); 300];
        let err = TransmitHints::derive(addr("2001:db8::1"), &sids, 20000, 862).unwrap_err();
        assert_eq!(
            err,
            BuildError::MalformedPacket(ParseError::FieldOverflow {
                field: "segments_left",
                value: 299
            })
        );
    }
}
