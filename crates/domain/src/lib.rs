//! dnslookup domain layer: wire codec, message model and answer resolution.
pub mod answers;
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod message;
pub mod query_id;
pub mod wire;

pub use answers::{resolve_answers, ResolvedAnswers};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{RecordClass, RecordType};
pub use errors::{DomainError, ErrorCode};
pub use message::{Header, Message, Question, RecordValue, ResourceRecord, MAX_DATAGRAM_SIZE};
pub use query_id::next_query_id;
pub use wire::{WireReader, WireWriter};
