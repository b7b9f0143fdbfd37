#![allow(dead_code)]

/// Hand-assembled wire bytes, for exercising the decoder against layouts the
/// encoder never produces (compression pointers, bad flags, truncation).
#[derive(Default)]
pub struct RawMessage {
    bytes: Vec<u8>,
}

impl RawMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header with the given id, raw flag bytes and section counts.
    pub fn header(id: u16, flags: [u8; 2], counts: [u16; 4]) -> Self {
        let mut raw = Self::new().u16(id).bytes(&flags);
        for count in counts {
            raw = raw.u16(count);
        }
        raw
    }

    /// Standard response header: QR, RD and RA set, rcode 0.
    pub fn response(id: u16, qdcount: u16, ancount: u16) -> Self {
        Self::header(id, [0x81, 0x80], [qdcount, ancount, 0, 0])
    }

    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// Labels without the terminating root label.
    pub fn labels(mut self, name: &str) -> Self {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            self.bytes.push(label.len() as u8);
            self.bytes.extend_from_slice(label.as_bytes());
        }
        self
    }

    /// Full uncompressed name including the root label.
    pub fn name(self, name: &str) -> Self {
        self.labels(name).u8(0)
    }

    pub fn pointer(self, offset: u16) -> Self {
        self.u16(0xC000 | offset)
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, raw: &[u8]) -> Self {
        self.bytes.extend_from_slice(raw);
        self
    }

    /// Question trailer: qtype and class IN.
    pub fn question_tail(self, qtype: u16) -> Self {
        self.u16(qtype).u16(1)
    }

    /// Record trailer after the owner name: type, class IN, ttl, rdlength.
    pub fn record_tail(self, rtype: u16, ttl: u32, rdlength: u16) -> Self {
        self.u16(rtype).u16(1).u32(ttl).u16(rdlength)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
