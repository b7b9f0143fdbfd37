use super::{MAX_NAME_LENGTH, MAX_LABEL_LENGTH, POINTER_MARKER};
use crate::DomainError;

/// Positional cursor over a received datagram.
///
/// Byte reads advance `position`; sub-byte reads are served from a one-byte
/// bit buffer that is refilled from the cursor only when it runs empty.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    bytes: &'a [u8],
    position: usize,
    bit_value: u8,
    bit_count: u8,
}

impl<'a> WireReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            bit_value: 0,
            bit_count: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Read the next `width` bits, most significant first.
    pub fn read_bits(&mut self, width: u8) -> Result<u8, DomainError> {
        if width == 0 || width > 8 {
            return Err(DomainError::Parse(format!(
                "cannot read {} bits at once",
                width
            )));
        }
        if self.bit_count == 0 {
            self.bit_value = self.read_u8()?;
            self.bit_count = 8;
        }
        if width > self.bit_count {
            return Err(DomainError::Parse(format!(
                "requested {} bits but only {} remain in the current byte",
                width, self.bit_count
            )));
        }

        let shift = self.bit_count - width;
        let value = self.bit_value >> shift;
        self.bit_count = shift;
        self.bit_value &= ((1u16 << shift) - 1) as u8;
        Ok(value)
    }

    /// Read an 8, 16 or 32 bit big-endian number.
    pub fn read_number(&mut self, width: u32) -> Result<u32, DomainError> {
        let raw = match width {
            8 | 16 | 32 => self.read_bytes((width / 8) as usize)?,
            _ => {
                return Err(DomainError::Parse(format!(
                    "unsupported number width {}",
                    width
                )))
            }
        };
        Ok(raw
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)))
    }

    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        let raw = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        self.read_number(32)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], DomainError> {
        let end = self
            .position
            .checked_add(length)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(DomainError::Bounds {
                position: self.position,
                requested: length,
                length: self.bytes.len(),
            })?;

        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Decode a possibly compressed domain name (RFC 1035 §4.1.4).
    ///
    /// Every name is assembled with a trailing dot, which is dropped when
    /// `strip_trailing_dot` is set. A compression pointer must target a
    /// position strictly before the start of the name being decoded, so each
    /// hop moves backwards and decoding always terminates.
    pub fn read_name(&mut self, strip_trailing_dot: bool) -> Result<String, DomainError> {
        let segment_start = self.position;
        let mut name = String::new();

        loop {
            let length_position = self.position;
            let length = self.read_u8()?;

            if length == 0 {
                break;
            }

            if usize::from(length) <= MAX_LABEL_LENGTH {
                let label = self.read_bytes(usize::from(length))?;
                name.push_str(&String::from_utf8_lossy(label));
                name.push('.');
            } else if length >= POINTER_MARKER {
                let low = self.read_u8()?;
                let offset = (usize::from(length & !POINTER_MARKER) << 8) | usize::from(low);
                if offset >= segment_start {
                    return Err(DomainError::Parse(format!(
                        "compression pointer at {} targets offset {}, which is not before {}",
                        length_position, offset, segment_start
                    )));
                }

                let suffix = self.with_position(offset, |reader| reader.read_name(false))?;
                name.push_str(&suffix);
                Self::check_name_length(&name)?;
                break;
            } else {
                return Err(DomainError::Parse(format!(
                    "reserved label type 0x{:02x} at {}",
                    length, length_position
                )));
            }

            Self::check_name_length(&name)?;
        }

        if strip_trailing_dot && name.ends_with('.') {
            name.pop();
        }
        Ok(name)
    }

    /// Run `f` with the cursor moved to `position`, then restore the cursor.
    ///
    /// The saved position is restored whether `f` succeeds or fails.
    pub fn with_position<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        if position > self.bytes.len() {
            return Err(DomainError::Bounds {
                position,
                requested: 0,
                length: self.bytes.len(),
            });
        }

        let saved = self.position;
        self.position = position;
        let result = f(self);
        self.position = saved;
        result
    }

    /// `name` is in dotted form with its trailing dot; the wire form is one
    /// octet longer (the root label).
    fn check_name_length(name: &str) -> Result<(), DomainError> {
        if name.len() + 1 > MAX_NAME_LENGTH {
            return Err(DomainError::Parse(format!(
                "name exceeds {} octets",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_then_byte() {
        let data = [0b1010_0101, 0x7F];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(3).unwrap(), 0b010);
        assert_eq!(reader.read_bits(4).unwrap(), 0b0101);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn test_read_bits_wider_than_buffered_fails() {
        let data = [0xFF];
        let mut reader = WireReader::new(&data);
        reader.read_bits(5).unwrap();
        assert!(reader.read_bits(4).is_err());
    }

    #[test]
    fn test_read_number_widths() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_number(8).unwrap(), 0x01);
        assert_eq!(reader.read_number(16).unwrap(), 0x0203);
        assert_eq!(reader.read_number(32).unwrap(), 0x04050607);
        assert!(reader.read_number(24).is_err());
    }

    #[test]
    fn test_read_past_end_is_bounds_error() {
        let data = [0x01];
        let mut reader = WireReader::new(&data);
        assert_eq!(
            reader.read_number(16),
            Err(DomainError::Bounds {
                position: 0,
                requested: 2,
                length: 1
            })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_with_position_restores_cursor_on_failure() {
        let data = [0x00, 0x01, 0x02];
        let mut reader = WireReader::new(&data);
        reader.read_u8().unwrap();
        let result = reader.with_position(2, |r| r.read_u16());
        assert!(result.is_err());
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_reserved_label_type_rejected() {
        let data = [0x40, b'a', 0x00];
        let mut reader = WireReader::new(&data);
        assert!(matches!(reader.read_name(true), Err(DomainError::Parse(_))));
    }

    #[test]
    fn test_pointer_into_own_segment_rejected() {
        // "a" followed by a pointer back to the start of the same name.
        let data = [0x01, b'a', 0xC0, 0x00];
        let mut reader = WireReader::new(&data);
        assert!(matches!(reader.read_name(true), Err(DomainError::Parse(_))));
    }
}
