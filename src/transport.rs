//! The seam between the codec and the network.
//!
//! The codec never opens or owns a socket. Callers hand it an already-open
//! transport as an opaque [`PacketSink`]; the sink owns serialization of the
//! shared socket and the outer IPv6/SRH header construction. A plain
//! [`std::net::UdpSocket`] implementation is provided for deployments where
//! the kernel performs the SRv6 encapsulation (e.g. via a configured
//! encap route toward [`TransmitHints::destination`]).

use std::io;
use std::net::UdpSocket;

use crate::error::StampError;
use crate::srv6::TransmitHints;

/// An already-open transport handle that can place a payload on the wire.
pub trait PacketSink {
    /// Send the payload toward the addressing described by `hints`.
    /// Returns the number of payload bytes accepted by the transport.
    fn send_payload(&self, payload: &[u8], hints: &TransmitHints) -> io::Result<usize>;
}

impl PacketSink for UdpSocket {
    fn send_payload(&self, payload: &[u8], hints: &TransmitHints) -> io::Result<usize> {
        self.send_to(payload, (hints.destination, hints.dst_port))
    }
}

/// Send a built payload through the given sink.
///
/// A rejected send surfaces as [`StampError::TransportUnavailable`]; the
/// codec performs no retries, leaving backoff to the session layer above.
pub fn send_packet<S: PacketSink>(
    sink: &S,
    payload: &[u8],
    hints: &TransmitHints,
) -> Result<usize, StampError> {
    let sent = sink
        .send_payload(payload, hints)
        .map_err(StampError::TransportUnavailable)?;
    log::trace!("sent {} byte payload to {}", sent, hints.destination);
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    struct RejectingSink;

    impl PacketSink for RejectingSink {
        fn send_payload(&self, _payload: &[u8], _hints: &TransmitHints) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::NotConnected, "sink closed"))
        }
    }

    struct CountingSink;

    impl PacketSink for CountingSink {
        fn send_payload(&self, payload: &[u8], _hints: &TransmitHints) -> io::Result<usize> {
            Ok(payload.len())
        }
    }

    fn hints() -> TransmitHints {
        let sid: Ipv6Addr = "2001:db8::2".parse().unwrap();
        TransmitHints::derive("2001:db8::1".parse().unwrap(), &[sid], 20000, 862).unwrap()
    }

    #[test]
    fn sink_failure_surfaces_as_transport_unavailable() {
        let err = send_packet(&RejectingSink, &[0u8; 16], &hints()).unwrap_err();
        assert!(matches!(err, StampError::TransportUnavailable(_)));
    }

    #[test]
    fn sink_success_reports_bytes_sent() {
        let sent = send_packet(&CountingSink, &[0u8; 16], &hints()).unwrap();
        assert_eq!(sent, 16);
    }
}
