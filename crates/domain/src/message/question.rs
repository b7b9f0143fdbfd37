use super::name::encode_name;
use crate::dns_record::{RecordClass, RecordType};
use crate::wire::{WireReader, WireWriter};
use crate::DomainError;
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: RecordType) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass: RecordClass::IN,
        }
    }

    pub fn a(name: impl Into<String>) -> Self {
        Self::new(name, RecordType::A)
    }

    /// Reverse-lookup question, e.g. `4.3.2.1.in-addr.arpa` for `1.2.3.4`.
    pub fn ptr(address: Ipv4Addr) -> Self {
        Self::new(reverse_name(address), RecordType::PTR)
    }

    pub fn encode(&self, writer: &mut WireWriter) -> Result<(), DomainError> {
        encode_name(writer, &self.name)?;
        writer.push_u16(self.qtype.to_u16())?;
        writer.push_u16(self.qclass.to_u16())
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = reader.read_name(true)?;
        let qtype = RecordType::from_u16(reader.read_u16()?);
        let qclass = RecordClass::from_u16(reader.read_u16()?);
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question(qname={:?}, qtype={}, qclass={})",
            self.name,
            self.qtype.to_u16(),
            self.qclass.to_u16()
        )
    }
}

fn reverse_name(address: Ipv4Addr) -> String {
    let [a, b, c, d] = address.octets();
    format!("{}.{}.{}.{}.in-addr.arpa", d, c, b, a)
}
