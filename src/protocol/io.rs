use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::io;

use super::{
    ErrorEstimate, ReadBytes, ReadFromBytes, ReplyPacket, TestPacket, Timestamp, WriteBytes,
    WriteToBytes,
};

// Writer implementations.

impl<W> WriteBytes for W
where
    W: WriteBytesExt,
{
    fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()> {
        protocol.write_to_bytes(self)
    }
}

impl<P> WriteToBytes for &P
where
    P: WriteToBytes,
{
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()> {
        (*self).write_to_bytes(writer)
    }
}

impl WriteToBytes for Timestamp {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.seconds)?;
        writer.write_u32::<BE>(self.fraction)?;
        Ok(())
    }
}

impl WriteToBytes for ErrorEstimate {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<BE>(self.to_word()?)?;
        Ok(())
    }
}

impl WriteToBytes for TestPacket {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.sequence_number)?;
        writer.write_bytes(self.timestamp)?;
        writer.write_bytes(self.error_estimate)?;
        writer.write_u16::<BE>(self.ssid)?;
        Ok(())
    }
}

impl WriteToBytes for ReplyPacket {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.sequence_number)?;
        writer.write_bytes(self.timestamp)?;
        writer.write_bytes(self.error_estimate)?;
        writer.write_u16::<BE>(self.ssid)?;
        writer.write_bytes(self.receive_timestamp)?;
        writer.write_u32::<BE>(self.sender_sequence_number)?;
        writer.write_bytes(self.sender_timestamp)?;
        writer.write_bytes(self.sender_error_estimate)?;
        writer.write_u16::<BE>(0)?;
        writer.write_u8(self.sender_ttl)?;
        Ok(())
    }
}

// Reader implementations.

impl<R> ReadBytes for R
where
    R: ReadBytesExt,
{
    fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P> {
        P::read_from_bytes(self)
    }
}

impl ReadFromBytes for Timestamp {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let seconds = reader.read_u32::<BE>()?;
        let fraction = reader.read_u32::<BE>()?;
        Ok(Timestamp { seconds, fraction })
    }
}

impl ReadFromBytes for ErrorEstimate {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let word = reader.read_u16::<BE>()?;
        Ok(ErrorEstimate::from_word(word))
    }
}

impl ReadFromBytes for TestPacket {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let sequence_number = reader.read_u32::<BE>()?;
        let timestamp = reader.read_bytes()?;
        let error_estimate = reader.read_bytes()?;
        let ssid = reader.read_u16::<BE>()?;
        Ok(TestPacket {
            sequence_number,
            timestamp,
            error_estimate,
            ssid,
        })
    }
}

impl ReadFromBytes for ReplyPacket {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let sequence_number = reader.read_u32::<BE>()?;
        let timestamp = reader.read_bytes()?;
        let error_estimate = reader.read_bytes()?;
        let ssid = reader.read_u16::<BE>()?;
        let receive_timestamp = reader.read_bytes()?;
        let sender_sequence_number = reader.read_u32::<BE>()?;
        let sender_timestamp = reader.read_bytes()?;
        let sender_error_estimate = reader.read_bytes()?;
        let _mbz = reader.read_u16::<BE>()?;
        let sender_ttl = reader.read_u8()?;
        Ok(ReplyPacket {
            sequence_number,
            timestamp,
            error_estimate,
            ssid,
            receive_timestamp,
            sender_sequence_number,
            sender_timestamp,
            sender_error_estimate,
            sender_ttl,
        })
    }
}
