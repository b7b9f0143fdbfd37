use super::name::encode_name;
use crate::dns_record::{RecordClass, RecordType};
use crate::wire::{WireReader, WireWriter};
use crate::DomainError;
use std::fmt;
use std::net::Ipv4Addr;

/// Interpreted rdata. Only address-bearing types and CNAME get one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Address(Ipv4Addr),
    Target(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: Vec<u8>,
    pub value: Option<RecordValue>,
}

impl ResourceRecord {
    /// Record with raw rdata and no interpreted value.
    pub fn new(
        name: impl Into<String>,
        rtype: RecordType,
        class: RecordClass,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            rtype,
            class,
            ttl,
            rdata,
            value: None,
        }
    }

    pub fn a(name: impl Into<String>, address: Ipv4Addr, ttl: u32) -> Self {
        Self {
            value: Some(RecordValue::Address(address)),
            ..Self::new(name, RecordType::A, RecordClass::IN, ttl, address.octets().to_vec())
        }
    }

    pub fn cname(
        name: impl Into<String>,
        target: impl Into<String>,
        ttl: u32,
    ) -> Result<Self, DomainError> {
        let target = target.into();
        let mut writer = WireWriter::new();
        encode_name(&mut writer, &target)?;
        let rdata = writer.finalize()?;

        Ok(Self {
            value: Some(RecordValue::Target(target)),
            ..Self::new(name, RecordType::CNAME, RecordClass::IN, ttl, rdata)
        })
    }

    pub fn rdlength(&self) -> usize {
        self.rdata.len()
    }

    pub fn type_name(&self) -> String {
        self.rtype.to_string()
    }

    pub fn class_name(&self) -> String {
        self.class.to_string()
    }

    pub fn is_address(&self) -> bool {
        self.class == RecordClass::IN && self.rtype.carries_address()
    }

    pub fn address(&self) -> Option<Ipv4Addr> {
        match &self.value {
            Some(RecordValue::Address(address)) => Some(*address),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match &self.value {
            Some(RecordValue::Target(target)) => Some(target),
            _ => None,
        }
    }

    pub fn encode(&self, writer: &mut WireWriter) -> Result<(), DomainError> {
        let rdlength = u16::try_from(self.rdata.len()).map_err(|_| {
            DomainError::InvalidMessage(format!("rdata of {} bytes is too long", self.rdata.len()))
        })?;

        encode_name(writer, &self.name)?;
        writer.push_u16(self.rtype.to_u16())?;
        writer.push_u16(self.class.to_u16())?;
        writer.push_u32(self.ttl)?;
        writer.push_u16(rdlength)?;
        writer.push_bytes(&self.rdata)
    }

    /// Decode one record and derive its value from the rdata.
    ///
    /// A and MX rdata of exactly four bytes is read as an IPv4 address. CNAME
    /// rdata is decoded as a name in place, so compression pointers inside it
    /// resolve against the whole message.
    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = reader.read_name(true)?;
        let rtype = RecordType::from_u16(reader.read_u16()?);
        let class = RecordClass::from_u16(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let rdlength = usize::from(reader.read_u16()?);
        let rdata_start = reader.position();
        let rdata = reader.read_bytes(rdlength)?.to_vec();

        let value = match rtype {
            RecordType::A | RecordType::MX => match <[u8; 4]>::try_from(rdata.as_slice()) {
                Ok(octets) => Some(RecordValue::Address(Ipv4Addr::from(octets))),
                Err(_) if rtype == RecordType::A => {
                    return Err(DomainError::Parse(format!(
                        "A record for {} has {} bytes of rdata",
                        name, rdlength
                    )))
                }
                Err(_) => None,
            },
            RecordType::CNAME => {
                let target = reader.with_position(rdata_start, |r| r.read_name(true))?;
                Some(RecordValue::Target(target))
            }
            _ => None,
        };

        Ok(Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
            value,
        })
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceRecord(name={:?}, type={}, class={}, ttl={}, rdlength={})",
            self.name,
            self.rtype,
            self.class,
            self.ttl,
            self.rdata.len()
        )
    }
}
