use std::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KatError, KatResult};

/// Largest key length the one-byte length field can carry
pub const MAX_KEY_LEN: usize = u8::MAX as usize;
/// Largest IV length the one-byte length field can carry
pub const MAX_IV_LEN: usize = u8::MAX as usize;
/// Largest AAD the coprocessor accepts
pub const MAX_AAD_LEN: usize = 127;
/// Largest text carried by the two-byte length field
pub const MAX_TEXT_LEN: usize = u16::MAX as usize;

/// Operation requested from the coprocessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum Direction {
    Decrypt = 0,
    Encrypt = 1,
}

impl Direction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Direction::Decrypt),
            1 => Some(Direction::Encrypt),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Decrypt => "DECRYPT",
            Direction::Encrypt => "ENCRYPT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The cipher command payload carried inside an extension frame.
///
/// Wire layout, lengths unsigned:
///
/// | field     | size       | notes                      |
/// |-----------|------------|----------------------------|
/// | direction | 1          | 0 decrypt, 1 encrypt       |
/// | submode   | 1          | [`super::Submode`] id      |
/// | key_len   | 1          | 16, 24 or 32               |
/// | key       | key_len    |                            |
/// | iv_len    | 1          | 0 or 16, any length in GCM |
/// | iv        | iv_len     |                            |
/// | aad_len   | 1          | at most 127                |
/// | aad       | aad_len    |                            |
/// | text_len  | 2          | big endian                 |
/// | text      | text_len   | clear or cipher text       |
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CryptoCommand {
    #[zeroize(skip)]
    pub direction: Direction,
    pub submode: u8,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub aad: Vec<u8>,
    pub text: Vec<u8>,
}

impl fmt::Debug for CryptoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoCommand")
            .field("direction", &self.direction)
            .field("submode", &self.submode)
            .field("key", &format!("[{} bytes]", self.key.len()))
            .field("iv", &hex::encode(&self.iv))
            .field("aad", &hex::encode(&self.aad))
            .field("text", &hex::encode(&self.text))
            .finish()
    }
}

impl CryptoCommand {
    pub fn new(
        direction: Direction,
        submode: u8,
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
        text: &[u8],
    ) -> Self {
        Self {
            direction,
            submode,
            key: key.to_vec(),
            iv: iv.to_vec(),
            aad: aad.to_vec(),
            text: text.to_vec(),
        }
    }

    /// Size of the encoded command in bytes
    pub fn encoded_len(&self) -> usize {
        1 + 1 + 1 + self.key.len() + 1 + self.iv.len() + 1 + self.aad.len() + 2 + self.text.len()
    }

    /// Serialize the command. `node` names the vector in length errors.
    pub fn encode(&self, node: &str) -> KatResult<Vec<u8>> {
        check_len(node, "key", self.key.len(), MAX_KEY_LEN)?;
        check_len(node, "iv", self.iv.len(), MAX_IV_LEN)?;
        check_len(node, "aad", self.aad.len(), MAX_AAD_LEN)?;
        check_len(node, "text", self.text.len(), MAX_TEXT_LEN)?;

        let mut cmd = Vec::with_capacity(self.encoded_len());
        cmd.push(self.direction as u8);
        cmd.push(self.submode);
        cmd.push(self.key.len() as u8);
        cmd.extend_from_slice(&self.key);
        cmd.push(self.iv.len() as u8);
        cmd.extend_from_slice(&self.iv);
        cmd.push(self.aad.len() as u8);
        cmd.extend_from_slice(&self.aad);
        cmd.extend_from_slice(&(self.text.len() as u16).to_be_bytes());
        cmd.extend_from_slice(&self.text);
        Ok(cmd)
    }

    /// Decode a command payload, rejecting truncated input and trailing bytes.
    pub fn parse(bytes: &[u8]) -> KatResult<Self> {
        let mut cursor = Cursor { bytes, offset: 0 };

        let direction = cursor.u8("direction")?;
        let direction = Direction::from_u8(direction).ok_or_else(|| {
            KatError::device_error("parse command", &format!("bad direction {}", direction))
        })?;
        let submode = cursor.u8("submode")?;
        let key_len = cursor.u8("key_len")? as usize;
        let key = cursor.take("key", key_len)?.to_vec();
        let iv_len = cursor.u8("iv_len")? as usize;
        let iv = cursor.take("iv", iv_len)?.to_vec();
        let aad_len = cursor.u8("aad_len")? as usize;
        let aad = cursor.take("aad", aad_len)?.to_vec();
        let text_len = cursor.take("text_len", 2)?;
        let text_len = u16::from_be_bytes([text_len[0], text_len[1]]) as usize;
        let text = cursor.take("text", text_len)?.to_vec();

        if cursor.offset != bytes.len() {
            return Err(KatError::device_error(
                "parse command",
                &format!("{} trailing bytes", bytes.len() - cursor.offset),
            ));
        }

        Ok(Self {
            direction,
            submode,
            key,
            iv,
            aad,
            text,
        })
    }
}

fn check_len(node: &str, field: &'static str, len: usize, max: usize) -> KatResult<()> {
    if len > max {
        return Err(KatError::FieldTooLong {
            node: node.to_string(),
            field,
            len,
            max,
        });
    }
    Ok(())
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, field: &str, len: usize) -> KatResult<&'a [u8]> {
        let end = self.offset + len;
        let slice = self.bytes.get(self.offset..end).ok_or_else(|| {
            KatError::device_error(
                "parse command",
                &format!(
                    "{} needs {} bytes at offset {}, only {} left",
                    field,
                    len,
                    self.offset,
                    self.bytes.len().saturating_sub(self.offset)
                ),
            )
        })?;
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self, field: &str) -> KatResult<u8> {
        Ok(self.take(field, 1)?[0])
    }
}
