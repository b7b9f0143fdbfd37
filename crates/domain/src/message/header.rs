use crate::wire::{WireReader, WireWriter};
use crate::DomainError;

/// Fixed 12-byte message header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub const LEN: usize = 12;

    /// Standard query with recursion desired and all counts at zero.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            rd: true,
            ..Self::default()
        }
    }

    pub fn encode(&self, writer: &mut WireWriter) -> Result<(), DomainError> {
        if self.opcode > 0x0F || self.rcode > 0x0F {
            return Err(DomainError::InvalidMessage(format!(
                "opcode {} / rcode {} do not fit in 4 bits",
                self.opcode, self.rcode
            )));
        }

        writer.push_u16(self.id)?;
        writer.push_bits(u8::from(self.qr), 1)?;
        writer.push_bits(self.opcode, 4)?;
        writer.push_bits(u8::from(self.aa), 1)?;
        writer.push_bits(u8::from(self.tc), 1)?;
        writer.push_bits(u8::from(self.rd), 1)?;
        writer.push_bits(u8::from(self.ra), 1)?;
        writer.push_bits(0, 3)?; // Z
        writer.push_bits(self.rcode, 4)?;
        writer.push_u16(self.qdcount)?;
        writer.push_u16(self.ancount)?;
        writer.push_u16(self.nscount)?;
        writer.push_u16(self.arcount)
    }

    /// Decode the header. Non-zero Z bits or a non-zero rcode are rejected.
    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let id = reader.read_u16()?;
        let qr = reader.read_bits(1)? == 1;
        let opcode = reader.read_bits(4)?;
        let aa = reader.read_bits(1)? == 1;
        let tc = reader.read_bits(1)? == 1;
        let rd = reader.read_bits(1)? == 1;
        let ra = reader.read_bits(1)? == 1;

        if reader.read_bits(3)? != 0 {
            return Err(DomainError::Parse("Z section was non-zero".to_string()));
        }

        let rcode = reader.read_bits(4)?;
        if rcode != 0 {
            return Err(DomainError::Parse(format!("rcode = {}", rcode)));
        }

        Ok(Self {
            id,
            qr,
            opcode,
            aa,
            tc,
            rd,
            ra,
            rcode,
            qdcount: reader.read_u16()?,
            ancount: reader.read_u16()?,
            nscount: reader.read_u16()?,
            arcount: reader.read_u16()?,
        })
    }
}
