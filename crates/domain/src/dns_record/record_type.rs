use std::fmt;

/// The sixteen record types defined by RFC 1035 §3.2.2. Any other code is
/// carried through as `Unknown` and rendered as `<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    Unknown(u16),
}

impl RecordType {
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::MD => 3,
            RecordType::MF => 4,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::MB => 7,
            RecordType::MG => 8,
            RecordType::MR => 9,
            RecordType::NULL => 10,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MINFO => 14,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            3 => RecordType::MD,
            4 => RecordType::MF,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            7 => RecordType::MB,
            8 => RecordType::MG,
            9 => RecordType::MR,
            10 => RecordType::NULL,
            11 => RecordType::WKS,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            14 => RecordType::MINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            other => RecordType::Unknown(other),
        }
    }

    /// Mnemonic for well-known types, `None` for unknown codes.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            RecordType::A => Some("A"),
            RecordType::NS => Some("NS"),
            RecordType::MD => Some("MD"),
            RecordType::MF => Some("MF"),
            RecordType::CNAME => Some("CNAME"),
            RecordType::SOA => Some("SOA"),
            RecordType::MB => Some("MB"),
            RecordType::MG => Some("MG"),
            RecordType::MR => Some("MR"),
            RecordType::NULL => Some("NULL"),
            RecordType::WKS => Some("WKS"),
            RecordType::PTR => Some("PTR"),
            RecordType::HINFO => Some("HINFO"),
            RecordType::MINFO => Some("MINFO"),
            RecordType::MX => Some("MX"),
            RecordType::TXT => Some("TXT"),
            RecordType::Unknown(_) => None,
        }
    }

    /// Types whose rdata is read as an IPv4 address.
    pub fn carries_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::MX)
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        RecordType::from_u16(code)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(name) => f.write_str(name),
            None => write!(f, "<{}>", self.to_u16()),
        }
    }
}
