//! Bit and byte level stream codec for the DNS wire format (RFC 1035 §4.1).
//!
//! All multi-byte numbers are big-endian. Sub-byte fields are packed
//! most-significant bit first, which is how the header flags are laid out.
mod reader;
mod writer;

pub use reader::WireReader;
pub use writer::WireWriter;

/// Longest domain name the decoder will assemble, in octets.
pub const MAX_NAME_LENGTH: usize = 255;

/// Longest single label, in octets.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Length byte values at or above this start a compression pointer.
pub(crate) const POINTER_MARKER: u8 = 0xC0;
