//! Wall-clock capture and conversion between the two STAMP timestamp
//! representations.
//!
//! Both formats are 64-bit split values: 32 bits of seconds and 32 bits of
//! fraction. NTP fractions count 1/2^32 of a second; PTP fractions count
//! nanoseconds. The seconds field of both is shifted by [`EPOCH_DELTA`] from
//! Unix time; no TAI correction is applied to the PTP variant.

use std::time;

use crate::protocol::{ReplyPacket, TestPacket, Timestamp, TimestampFormat};

/// The number of seconds from 1st January 1900 UTC to the start of the Unix
/// epoch (70 years plus 17 leap days).
pub const EPOCH_DELTA: i64 = 2_208_988_800;

// The NTP fractional scale.
const NTP_SCALE: f64 = u32::MAX as f64;

// The PTP fractional scale (nanoseconds per second).
const PTP_SCALE: f64 = 1e9;

/// Describes an instant relative to the `UNIX_EPOCH` - 00:00:00 Coordinated
/// Universal Time (UTC), Thursday, 1 January 1970 in seconds with the
/// fractional part in nanoseconds.
///
/// If the **Instant** describes some moment prior to `UNIX_EPOCH`, both the
/// `secs` and `subsec_nanos` components will be negative.
///
/// Its purpose here is retrieving the current time via `std::time` and
/// feeding [`Timestamp::from_instant`]. A Session-Reflector captures one
/// `Instant` when a Test packet arrives and another just before the Reply
/// leaves, so the two wire timestamps can differ.
#[derive(Copy, Clone, Debug)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// To indicate a time following `UNIX_EPOCH`, both `secs` and
    /// `subsec_nanos` must be positive. To indicate a time prior to
    /// `UNIX_EPOCH`, both must be negative. Violating these invariants will
    /// result in a **panic!**.
    pub fn new(secs: i64, subsec_nanos: i32) -> Instant {
        if secs > 0 && subsec_nanos < 0 {
            panic!("invalid instant: secs was positive but subsec_nanos was negative");
        }
        if secs < 0 && subsec_nanos > 0 {
            panic!("invalid instant: secs was negative but subsec_nanos was positive");
        }
        Instant { secs, subsec_nanos }
    }

    /// Uses `std::time::SystemTime::now` and `std::time::UNIX_EPOCH` to
    /// determine the current **Instant**.
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => {
                let secs = duration.as_secs() as i64;
                let subsec_nanos = duration.subsec_nanos() as i32;
                Instant::new(secs, subsec_nanos)
            }
            Err(sys_time_err) => {
                let duration_pre_unix_epoch = sys_time_err.duration();
                let secs = -(duration_pre_unix_epoch.as_secs() as i64);
                let subsec_nanos = -(duration_pre_unix_epoch.subsec_nanos() as i32);
                Instant::new(secs, subsec_nanos)
            }
        }
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }
}

impl Timestamp {
    /// Convert a Unix [`Instant`] to a wire [`Timestamp`] in the given
    /// format.
    ///
    /// Seconds are shifted by [`EPOCH_DELTA`] and truncated to 32 bits (the
    /// era wraps after ~136 years). The fraction is scaled to the format's
    /// resolution; sub-nanosecond remainders are lost, which is the
    /// RFC-mandated truncation for 32-bit fractions.
    pub fn from_instant(instant: Instant, format: TimestampFormat) -> Timestamp {
        let seconds = (instant.secs() + EPOCH_DELTA) as u32;
        let fraction = match format {
            TimestampFormat::NtpV4 => {
                (instant.subsec_nanos() as f64 * NTP_SCALE / PTP_SCALE) as u32
            }
            TimestampFormat::PtpV2 => instant.subsec_nanos() as u32,
        };
        Timestamp { seconds, fraction }
    }

    /// Reassemble this split timestamp into a real-valued number of seconds
    /// since the protocol epoch, interpreting the fraction per `format`.
    pub fn as_secs(self, format: TimestampFormat) -> f64 {
        reassemble(self, format)
    }
}

/// Capture the current time in NTP version 4 64-bit timestamp format
/// (RFC 5905): 32-bit seconds spanning 136 years and a 32-bit fraction
/// resolving ~232 picoseconds.
pub fn now_ntp() -> Timestamp {
    let timestamp = Timestamp::from_instant(Instant::now(), TimestampFormat::NtpV4);
    log::trace!(
        "NTP timestamp: {} seconds, {} fractional seconds",
        timestamp.seconds,
        timestamp.fraction
    );
    timestamp
}

/// Capture the current time in IEEE 1588v2 PTP truncated 64-bit timestamp
/// format: 32-bit seconds and a 32-bit nanosecond fraction.
pub fn now_ptp() -> Timestamp {
    let timestamp = Timestamp::from_instant(Instant::now(), TimestampFormat::PtpV2);
    log::trace!(
        "PTP timestamp: {} seconds, {} fractional seconds",
        timestamp.seconds,
        timestamp.fraction
    );
    timestamp
}

/// Take a split timestamp and return the real-valued seconds it represents.
///
/// The fraction is divided by 2^32 for NTP and by 10^9 for PTP. The match is
/// exhaustive over [`TimestampFormat`]; a caller that does not know the
/// format of a received timestamp has nothing to pass here and must consult
/// the packet's `Z` flag first.
pub fn reassemble(timestamp: Timestamp, format: TimestampFormat) -> f64 {
    match format {
        TimestampFormat::NtpV4 => {
            timestamp.seconds as f64 + timestamp.fraction as f64 / NTP_SCALE
        }
        TimestampFormat::PtpV2 => {
            timestamp.seconds as f64 + timestamp.fraction as f64 / PTP_SCALE
        }
    }
}

// Format-aware reassembly helpers keyed on each packet's own Z flag.

impl TestPacket {
    /// The send timestamp as real-valued seconds, interpreted per the
    /// packet's own `Z` flag.
    pub fn timestamp_secs(&self) -> f64 {
        reassemble(self.timestamp, self.error_estimate.format)
    }
}

impl ReplyPacket {
    /// The Reflector's send timestamp as real-valued seconds, interpreted
    /// per the Reply's own `Z` flag.
    pub fn timestamp_secs(&self) -> f64 {
        reassemble(self.timestamp, self.error_estimate.format)
    }

    /// The receive timestamp as real-valued seconds. The Receive Timestamp
    /// shares the Reply's own `Z` flag since the Reflector wrote both.
    pub fn receive_timestamp_secs(&self) -> f64 {
        reassemble(self.receive_timestamp, self.error_estimate.format)
    }

    /// The echoed sender timestamp as real-valued seconds, interpreted per
    /// the echoed sender `Z` flag.
    pub fn sender_timestamp_secs(&self) -> f64 {
        reassemble(self.sender_timestamp, self.sender_error_estimate.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ntp_seconds_are_epoch_shifted() {
        // 2024-01-01 00:00:00 UTC: Unix=1704067200, NTP=3913056000
        let instant = Instant::new(1_704_067_200, 0);
        let ts = Timestamp::from_instant(instant, TimestampFormat::NtpV4);
        assert_eq!(ts.seconds, 3_913_056_000);
        assert_eq!(ts.fraction, 0);
    }

    #[test]
    fn ntp_half_second_fraction() {
        let instant = Instant::new(1_704_067_200, 500_000_000);
        let ts = Timestamp::from_instant(instant, TimestampFormat::NtpV4);
        // Half of the 32-bit fraction range, within scaling error.
        let expected = (u32::MAX as f64 / 2.0) as u32;
        assert!(ts.fraction.abs_diff(expected) <= 1);
    }

    #[test]
    fn ptp_fraction_is_nanoseconds() {
        let instant = Instant::new(1_704_067_200, 123_456_789);
        let ts = Timestamp::from_instant(instant, TimestampFormat::PtpV2);
        assert_eq!(ts.seconds, 3_913_056_000);
        assert_eq!(ts.fraction, 123_456_789);
    }

    #[test]
    fn reassemble_ntp() {
        let ts = Timestamp {
            seconds: 3_913_056_000,
            fraction: u32::MAX / 2,
        };
        let secs = reassemble(ts, TimestampFormat::NtpV4);
        assert!((secs - 3_913_056_000.5).abs() < 1e-6);
    }

    #[test]
    fn reassemble_ptp() {
        let ts = Timestamp {
            seconds: 3_913_056_000,
            fraction: 250_000_000,
        };
        let secs = reassemble(ts, TimestampFormat::PtpV2);
        assert!((secs - 3_913_056_000.25).abs() < 1e-9);
    }

    #[test]
    fn reassemble_formats_disagree_on_same_bits() {
        // The same wire bits mean different subsecond values per format, so
        // a parser must consult Z rather than assume one of them.
        let ts = Timestamp {
            seconds: 0,
            fraction: 500_000_000,
        };
        let ntp = reassemble(ts, TimestampFormat::NtpV4);
        let ptp = reassemble(ts, TimestampFormat::PtpV2);
        assert!((ptp - 0.5).abs() < 1e-9);
        assert!((ntp - 0.1164).abs() < 1e-3);
        assert!(ntp != ptp);
    }

    #[test]
    fn instant_roundtrip_within_resolution() {
        let instant = Instant::new(1_704_067_200, 250_000_000);
        for format in [TimestampFormat::NtpV4, TimestampFormat::PtpV2] {
            let ts = Timestamp::from_instant(instant, format);
            let secs = reassemble(ts, format);
            let expected = (instant.secs() + EPOCH_DELTA) as f64 + 0.25;
            assert!((secs - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn now_is_after_2024() {
        let ts = now_ntp();
        // 2024-01-01 in NTP seconds.
        assert!(ts.seconds > 3_913_056_000);
    }
}
