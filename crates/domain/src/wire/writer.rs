use crate::DomainError;

/// Accumulates bits and bytes into an output buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    bytes: Vec<u8>,
    pending_bits: u8,
    pending_value: u8,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append the low `width` bits of `value`. A completed byte is flushed to
    /// the output as soon as 8 bits have accumulated.
    pub fn push_bits(&mut self, value: u8, width: u8) -> Result<(), DomainError> {
        if width == 0 {
            return Ok(());
        }
        if width > 8 || self.pending_bits + width > 8 {
            return Err(DomainError::Alignment {
                pending_bits: self.pending_bits,
            });
        }

        let mask = ((1u16 << width) - 1) as u8;
        self.pending_value = ((u16::from(self.pending_value) << width) as u8) | (value & mask);
        self.pending_bits += width;

        if self.pending_bits == 8 {
            self.bytes.push(self.pending_value);
            self.pending_value = 0;
            self.pending_bits = 0;
        }
        Ok(())
    }

    /// Append `width / 8` bytes of `value`, most significant byte first.
    pub fn push_number(&mut self, value: u64, width: u32) -> Result<(), DomainError> {
        if width % 8 != 0 || width > 64 {
            return Err(DomainError::InvalidMessage(format!(
                "number width {} is not a whole number of bytes",
                width
            )));
        }
        self.ensure_aligned()?;

        let mut shift = width;
        while shift > 0 {
            shift -= 8;
            self.bytes.push((value >> shift) as u8);
        }
        Ok(())
    }

    pub fn push_u8(&mut self, value: u8) -> Result<(), DomainError> {
        self.push_number(u64::from(value), 8)
    }

    pub fn push_u16(&mut self, value: u16) -> Result<(), DomainError> {
        self.push_number(u64::from(value), 16)
    }

    pub fn push_u32(&mut self, value: u32) -> Result<(), DomainError> {
        self.push_number(u64::from(value), 32)
    }

    /// Append raw bytes verbatim.
    pub fn push_bytes(&mut self, raw: &[u8]) -> Result<(), DomainError> {
        self.ensure_aligned()?;
        self.bytes.extend_from_slice(raw);
        Ok(())
    }

    /// Number of whole bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.pending_bits == 0
    }

    /// Return the accumulated bytes. Fails if a partial bit group is pending.
    pub fn finalize(self) -> Result<Vec<u8>, DomainError> {
        self.ensure_aligned()?;
        Ok(self.bytes)
    }

    fn ensure_aligned(&self) -> Result<(), DomainError> {
        if self.pending_bits != 0 {
            return Err(DomainError::Alignment {
                pending_bits: self.pending_bits,
            });
        }
        Ok(())
    }
}
