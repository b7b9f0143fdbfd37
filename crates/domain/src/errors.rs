use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Non-byte aligned bits: {pending_bits} bit(s) still pending")]
    Alignment { pending_bits: u8 },

    #[error("Read past end of buffer: position {position} + {requested} exceeds length {length}")]
    Bounds {
        position: usize,
        requested: usize,
        length: usize,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidMessage(String),

    #[error("No nameserver was available to fulfil the request")]
    NoNameservers,

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    Io(String),
}

impl DomainError {
    /// Stable failure code reported to lookup callers.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::QueryTimeout => ErrorCode::Timeout,
            DomainError::NoNameservers => ErrorCode::NoNameservers,
            DomainError::Parse(_) | DomainError::Bounds { .. } => ErrorCode::MalformedResponse,
            DomainError::Io(_) => ErrorCode::SocketError,
            DomainError::Alignment { .. }
            | DomainError::InvalidDomainName(_)
            | DomainError::InvalidMessage(_) => ErrorCode::InvalidQuery,
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Timeout = 1,
    NoNameservers = 2,
    MalformedResponse = 3,
    SocketError = 4,
    InvalidQuery = 5,
}

impl ErrorCode {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            1 => Some(ErrorCode::Timeout),
            2 => Some(ErrorCode::NoNameservers),
            3 => Some(ErrorCode::MalformedResponse),
            4 => Some(ErrorCode::SocketError),
            5 => Some(ErrorCode::InvalidQuery),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::NoNameservers => "NO_NAMESERVERS",
            ErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorCode::SocketError => "SOCKET_ERROR",
            ErrorCode::InvalidQuery => "INVALID_QUERY",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Timeout => "The query timed out",
            ErrorCode::NoNameservers => "No nameserver was available to fulfil the request",
            ErrorCode::MalformedResponse => "The response could not be decoded",
            ErrorCode::SocketError => "A socket operation failed",
            ErrorCode::InvalidQuery => "The query could not be encoded",
        }
    }

    /// Renders `NAME: description`.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.name(), self.description())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
