use log::debug;

use super::document::Record;
use crate::error::{KatError, KatResult};

/// Fields stored in hex format unless the record says otherwise
pub const DEFAULT_HEX_FIELDS: [&str; 5] = ["aad", "cipher_text", "iv", "key", "tag"];

/// Hex digits making up one little-endian 32-bit word
const WORD_HEX_DIGITS: usize = 8;

/// Encoding of a field's text content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Hex digits, converted to bytes in little-endian 32-bit words
    Hex,
    /// Text used as-is after line normalization
    Ascii,
}

impl FieldFormat {
    /// Format a field uses when no `format` attribute is present
    pub fn default_for(field: &str) -> Self {
        if DEFAULT_HEX_FIELDS.contains(&field) {
            FieldFormat::Hex
        } else {
            FieldFormat::Ascii
        }
    }

    /// Resolve the declared format of a field, falling back to the default
    pub fn resolve(node: &str, field: &str, declared: Option<&str>) -> KatResult<Self> {
        match declared {
            None | Some("") => Ok(Self::default_for(field)),
            Some("hex") => Ok(FieldFormat::Hex),
            Some("ascii") => Ok(FieldFormat::Ascii),
            Some(other) => Err(KatError::UnsupportedFormat {
                node: node.to_string(),
                field: field.to_string(),
                format: other.to_string(),
            }),
        }
    }
}

/// Collapse line breaks: empty lines are dropped, the rest are stripped and
/// rejoined with single spaces.
///
/// A whitespace-only line is not empty, so it survives as `""` and still
/// contributes a separator: `"\n  abc\n  "` becomes `"abc "`.
pub fn normalize_ascii(text: &str) -> String {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert hex text into the coprocessor's byte layout.
///
/// Every complete group of 8 hex digits is read as a 32-bit value and emitted
/// little-endian. The 1 to 3 bytes left over after the last complete word are
/// emitted one by one in their original order, without padding to a word.
///
/// `"0102030405"` decodes to `[04, 03, 02, 01, 05]`.
pub fn decode_hex_words(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = text.as_bytes();
    let mut value = Vec::with_capacity(digits.len() / 2);

    let mut words = digits.chunks_exact(WORD_HEX_DIGITS);
    for word in &mut words {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(word, &mut bytes)?;
        value.extend_from_slice(&u32::from_be_bytes(bytes).to_le_bytes());
    }

    value.extend(hex::decode(words.remainder())?);
    Ok(value)
}

/// Extract and decode one field of a record.
///
/// A missing optional field decodes to an empty value. Ascii fields yield the
/// normalized text bytes; hex fields yield the word-swapped binary payload.
pub fn decode_field(record: &Record, field: &str, required: bool) -> KatResult<Vec<u8>> {
    let node = record.name();
    let value = match record.find(field) {
        Some(value) => value,
        None if required => return Err(KatError::missing_field(node, field)),
        None => return Ok(Vec::new()),
    };

    let format = FieldFormat::resolve(node, field, value.format.as_deref())?;
    let text = normalize_ascii(value.text.as_deref().unwrap_or_default());

    match format {
        FieldFormat::Ascii => Ok(text.into_bytes()),
        FieldFormat::Hex => {
            let digits: String = text.split_whitespace().collect();
            let bytes = decode_hex_words(&digits).map_err(|e| {
                debug!("{}:{} hex conversion failed: {}", node, field, e);
                KatError::malformed_hex(node, field, &digits)
            })?;
            debug!("{}:{} decoded {} bytes", node, field, bytes.len());
            Ok(bytes)
        }
    }
}

/// Decode an optional decimal length field such as `clear_text_len`.
///
/// Returns `None` when the field is absent or empty.
pub fn decode_length(record: &Record, field: &str) -> KatResult<Option<usize>> {
    let raw = decode_field(record, field, false)?;
    if raw.is_empty() {
        return Ok(None);
    }

    let text = String::from_utf8_lossy(&raw);
    text.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|_| KatError::MalformedLength {
            node: record.name().to_string(),
            field: field.to_string(),
            text: text.into_owned(),
        })
}
