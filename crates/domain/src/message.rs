//! DNS message codec: header, question and resource-record sections.
mod header;
mod name;
mod question;
mod resource_record;

pub use header::Header;
pub use name::encode_name;
pub use question::Question;
pub use resource_record::{RecordValue, ResourceRecord};

use crate::answers::{resolve_answers, ResolvedAnswers};
use crate::wire::{WireReader, WireWriter};
use crate::DomainError;
use std::net::Ipv4Addr;

/// Largest message sent or accepted over UDP by this client.
pub const MAX_DATAGRAM_SIZE: usize = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Message {
    /// Empty message carrying a standard recursive query header.
    pub fn with_header(id: u16) -> Self {
        Self::from_header(Header::query(id))
    }

    /// Message with the given header and empty sections. Counts are taken
    /// from `header` as-is.
    pub fn from_header(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// Recursive query for the A record of `name`.
    pub fn a_query(name: &str, id: u16) -> Self {
        let mut message = Self::with_header(id);
        message.add_question(Question::a(name));
        message
    }

    /// Recursive reverse lookup for `address` under `in-addr.arpa`.
    pub fn ptr_query(address: Ipv4Addr, id: u16) -> Self {
        let mut message = Self::with_header(id);
        message.add_question(Question::ptr(address));
        message
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Always empty for decoded messages; see [`Message::from_wire`].
    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authorities
    }

    /// Always empty for decoded messages; see [`Message::from_wire`].
    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qdcount = self.header.qdcount.saturating_add(1);
    }

    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.header.ancount = self.header.ancount.saturating_add(1);
    }

    pub fn add_authority(&mut self, record: ResourceRecord) {
        self.authorities.push(record);
        self.header.nscount = self.header.nscount.saturating_add(1);
    }

    pub fn add_additional(&mut self, record: ResourceRecord) {
        self.additionals.push(record);
        self.header.arcount = self.header.arcount.saturating_add(1);
    }

    /// Serialize the header followed by the question, answer, authority and
    /// additional sections, each exactly once.
    pub fn to_wire(&self) -> Result<Vec<u8>, DomainError> {
        check_count("question", self.header.qdcount, self.questions.len())?;
        check_count("answer", self.header.ancount, self.answers.len())?;
        check_count("authority", self.header.nscount, self.authorities.len())?;
        check_count("additional", self.header.arcount, self.additionals.len())?;

        let mut writer = WireWriter::with_capacity(512);
        self.header.encode(&mut writer)?;

        for question in &self.questions {
            question.encode(&mut writer)?;
        }
        for section in [&self.answers, &self.authorities, &self.additionals] {
            for record in section {
                record.encode(&mut writer)?;
            }
        }

        writer.finalize()
    }

    /// Decode a complete message.
    ///
    /// Questions and answers are decoded; the authority and additional
    /// counts are read but their records are left undecoded, so
    /// `authorities()` and `additionals()` come back empty.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, DomainError> {
        let mut reader = WireReader::new(bytes);
        let header = Header::decode(&mut reader)?;

        let questions = (0..header.qdcount)
            .map(|_| Question::decode(&mut reader))
            .collect::<Result<Vec<_>, _>>()?;
        let answers = (0..header.ancount)
            .map(|_| ResourceRecord::decode(&mut reader))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            header,
            questions,
            answers,
            authorities: Vec::new(),
            additionals: Vec::new(),
        })
    }

    /// Name to address mapping for the answer section, CNAMEs followed.
    pub fn answer_names(&self) -> ResolvedAnswers {
        resolve_answers(&self.answers)
    }
}

fn check_count(section: &str, declared: u16, actual: usize) -> Result<(), DomainError> {
    if usize::from(declared) != actual {
        return Err(DomainError::InvalidMessage(format!(
            "{} count {} does not match {} {} record(s)",
            section, declared, actual, section
        )));
    }
    Ok(())
}
