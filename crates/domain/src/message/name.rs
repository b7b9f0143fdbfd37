use crate::wire::{WireWriter, MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use crate::DomainError;

/// Write `name` as an uncompressed label sequence ending in the root label.
/// A trailing dot is optional; `""` and `"."` both encode the root.
pub fn encode_name(writer: &mut WireWriter, name: &str) -> Result<(), DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    // length bytes plus the root label
    if trimmed.len() + 2 > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} octets",
            name, MAX_NAME_LENGTH
        )));
    }

    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{}' has a label of {} octets",
                    name,
                    label.len()
                )));
            }
            writer.push_u8(label.len() as u8)?;
            writer.push_bytes(label.as_bytes())?;
        }
    }

    writer.push_u8(0)
}
