use crate::error::ParseError;

use super::{
    ConstPackedSizeBytes, ErrorEstimate, FromBytes, ReplyPacket, TestPacket, Timestamp, ToBytes,
};

impl FromBytes for Timestamp {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let seconds = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let fraction = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok((Timestamp { seconds, fraction }, Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for Timestamp {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        buf[..4].copy_from_slice(&self.seconds.to_be_bytes());
        buf[4..8].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl FromBytes for ErrorEstimate {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let word = u16::from_be_bytes([buf[0], buf[1]]);
        Ok((ErrorEstimate::from_word(word), Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for ErrorEstimate {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let word = self.to_word()?;
        buf[..2].copy_from_slice(&word.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl FromBytes for TestPacket {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let mut offset = 0;

        let sequence_number =
            u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        offset += 4;

        let (timestamp, n) = Timestamp::from_bytes(&buf[offset..])?;
        offset += n;

        let (error_estimate, n) = ErrorEstimate::from_bytes(&buf[offset..])?;
        offset += n;

        let ssid = u16::from_be_bytes([buf[offset], buf[offset + 1]]);
        offset += 2;

        Ok((
            TestPacket {
                sequence_number,
                timestamp,
                error_estimate,
                ssid,
            },
            offset,
        ))
    }
}

impl ToBytes for TestPacket {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let mut offset = 0;

        buf[..4].copy_from_slice(&self.sequence_number.to_be_bytes());
        offset += 4;
        offset += self.timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.error_estimate.to_bytes(&mut buf[offset..])?;
        buf[offset..offset + 2].copy_from_slice(&self.ssid.to_be_bytes());
        offset += 2;

        Ok(offset)
    }
}

impl FromBytes for ReplyPacket {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let mut offset = 0;

        let sequence_number =
            u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        offset += 4;

        let (timestamp, n) = Timestamp::from_bytes(&buf[offset..])?;
        offset += n;

        let (error_estimate, n) = ErrorEstimate::from_bytes(&buf[offset..])?;
        offset += n;

        let ssid = u16::from_be_bytes([buf[offset], buf[offset + 1]]);
        offset += 2;

        let (receive_timestamp, n) = Timestamp::from_bytes(&buf[offset..])?;
        offset += n;

        let sender_sequence_number = u32::from_be_bytes([
            buf[offset],
            buf[offset + 1],
            buf[offset + 2],
            buf[offset + 3],
        ]);
        offset += 4;

        let (sender_timestamp, n) = Timestamp::from_bytes(&buf[offset..])?;
        offset += n;

        let (sender_error_estimate, n) = ErrorEstimate::from_bytes(&buf[offset..])?;
        offset += n;

        // MBZ word: ignored, not validated.
        offset += 2;

        let sender_ttl = buf[offset];
        offset += 1;

        Ok((
            ReplyPacket {
                sequence_number,
                timestamp,
                error_estimate,
                ssid,
                receive_timestamp,
                sender_sequence_number,
                sender_timestamp,
                sender_error_estimate,
                sender_ttl,
            },
            offset,
        ))
    }
}

impl ToBytes for ReplyPacket {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let mut offset = 0;

        buf[..4].copy_from_slice(&self.sequence_number.to_be_bytes());
        offset += 4;
        offset += self.timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.error_estimate.to_bytes(&mut buf[offset..])?;
        buf[offset..offset + 2].copy_from_slice(&self.ssid.to_be_bytes());
        offset += 2;
        offset += self.receive_timestamp.to_bytes(&mut buf[offset..])?;
        buf[offset..offset + 4].copy_from_slice(&self.sender_sequence_number.to_be_bytes());
        offset += 4;
        offset += self.sender_timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.sender_error_estimate.to_bytes(&mut buf[offset..])?;
        buf[offset] = 0;
        buf[offset + 1] = 0;
        offset += 2;
        buf[offset] = self.sender_ttl;
        offset += 1;

        Ok(offset)
    }
}
