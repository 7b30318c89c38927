use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::decoder::{decode_field, decode_length};
use super::document::Record;
use crate::codec::is_gcm_name;
use crate::error::{KatError, KatResult};
use crate::utils::concat_bytes;

/// AES key sizes the coprocessor accepts, in bytes
pub const VALID_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// IV size required by every submode except GCM
pub const BLOCK_IV_SIZE: usize = 16;

/// A fully decoded and validated test vector
///
/// Key material is scrubbed when the vector is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TestVector {
    pub name: String,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub aad: Vec<u8>,
    pub clear_text: Vec<u8>,
    pub cipher_text: Vec<u8>,
    pub tag: Vec<u8>,
}

impl std::fmt::Debug for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestVector")
            .field("name", &self.name)
            .field("key", &format!("[{} bytes]", self.key.len()))
            .field("iv", &hex::encode(&self.iv))
            .field("aad", &hex::encode(&self.aad))
            .field("clear_text", &hex::encode(&self.clear_text))
            .field("cipher_text", &hex::encode(&self.cipher_text))
            .field("tag", &hex::encode(&self.tag))
            .finish()
    }
}

impl TestVector {
    /// Decode a record and validate key and IV sizes.
    ///
    /// A declared `clear_text_len` truncates both the clear text and the
    /// cipher text, and a declared `aad_len` truncates the AAD, so padding in
    /// the document never reaches the expected outputs.
    pub fn from_record(record: &Record) -> KatResult<Self> {
        let name = record.name().to_string();

        let key = decode_field(record, "key", true)?;
        if !VALID_KEY_SIZES.contains(&key.len()) {
            return Err(KatError::InvalidKeySize { node: name, key });
        }

        let iv = decode_field(record, "iv", false)?;
        if !iv.is_empty() && !is_gcm_name(&name) && iv.len() != BLOCK_IV_SIZE {
            return Err(KatError::InvalidIvSize { node: name, iv });
        }

        let clear_text_len = decode_length(record, "clear_text_len")?;
        let mut clear_text = decode_field(record, "clear_text", false)?;
        let mut cipher_text = decode_field(record, "cipher_text", false)?;
        if let Some(len) = clear_text_len {
            clear_text.truncate(len);
            cipher_text.truncate(len);
        }
        debug!("{}: clear text size {}", name, clear_text.len());

        let tag = decode_field(record, "tag", false)?;

        let mut aad = decode_field(record, "aad", false)?;
        if let Some(len) = decode_length(record, "aad_len")? {
            aad.truncate(len);
        }

        Ok(Self {
            name,
            key,
            iv,
            aad,
            clear_text,
            cipher_text,
            tag,
        })
    }

    /// Output expected from the encrypt pass: cipher text followed by the tag
    pub fn expected_encrypt_output(&self) -> Vec<u8> {
        concat_bytes(&[self.cipher_text.as_slice(), self.tag.as_slice()])
    }

    /// Output expected from the decrypt pass: clear text followed by the tag
    pub fn expected_decrypt_output(&self) -> Vec<u8> {
        concat_bytes(&[self.clear_text.as_slice(), self.tag.as_slice()])
    }
}
