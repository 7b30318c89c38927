use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::{
    U1, U10, U11, U12, U13, U14, U15, U16, U2, U3, U4, U5, U6, U7, U8, U9,
};
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::AeadInPlace;
use aes_gcm::AesGcm;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use log::debug;

use super::frame::{
    self, VENDOR_RC_BOGUS_ARGS, VENDOR_RC_INTERNAL_ERROR, VENDOR_RC_NO_SUCH_SUBCOMMAND,
    VENDOR_RC_SUCCESS,
};
use super::Transport;
use crate::codec::{CryptoCommand, Direction, Submode, AES_SUBCOMMAND};
use crate::error::KatResult;
use crate::utils::{concat_bytes, hex_dump};

const BLOCK_SIZE: usize = 16;

/// Run `$body` with `$cipher` aliased to the AES variant matching the key length
macro_rules! with_aes {
    ($key:expr, $cipher:ident => $body:expr) => {
        match $key.len() {
            16 => {
                type $cipher = Aes128;
                $body
            }
            24 => {
                type $cipher = Aes192;
                $body
            }
            32 => {
                type $cipher = Aes256;
                $body
            }
            _ => Err(VENDOR_RC_BOGUS_ARGS),
        }
    };
}

/// Software model of the coprocessor's AES extension command.
///
/// Block modes (ECB, CBC) zero-pad the text to whole blocks, stream modes
/// (CTR, OFB, CFB) keep its length, and GCM appends a 16-byte tag in both
/// directions without verifying anything itself. GCM IVs longer than 16 bytes
/// are rejected.
#[derive(Debug, Default)]
pub struct SoftCoprocessor {
    debug: bool,
    commands_executed: usize,
    last_command: Option<Vec<u8>>,
}

impl SoftCoprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Number of frames received so far
    pub fn commands_executed(&self) -> usize {
        self.commands_executed
    }

    /// Payload of the most recent frame
    pub fn last_command(&self) -> Option<&[u8]> {
        self.last_command.as_deref()
    }

    fn execute_aes(&self, payload: &[u8]) -> Result<Vec<u8>, u32> {
        let cmd = CryptoCommand::parse(payload).map_err(|e| {
            debug!("rejecting AES command: {}", e);
            VENDOR_RC_BOGUS_ARGS
        })?;
        let submode = Submode::from_id(cmd.submode).ok_or(VENDOR_RC_BOGUS_ARGS)?;
        if submode != Submode::Ecb && cmd.iv.is_empty() {
            return Err(VENDOR_RC_BOGUS_ARGS);
        }

        if self.debug {
            debug!(
                "soft coprocessor: {} {} key {} bytes, iv {} bytes, aad {} bytes, text {} bytes",
                submode,
                cmd.direction,
                cmd.key.len(),
                cmd.iv.len(),
                cmd.aad.len(),
                cmd.text.len()
            );
        }

        match submode {
            Submode::Ecb => ecb(&BlockKey::new(&cmd.key)?, cmd.direction, &cmd.text),
            Submode::Cbc => cbc_crypt(&cmd.key, &cmd.iv, cmd.direction, &cmd.text),
            Submode::Ctr => ctr_crypt(&cmd.key, &cmd.iv, &cmd.text),
            Submode::Ofb => ofb(&BlockKey::new(&cmd.key)?, &cmd.iv, &cmd.text),
            Submode::Cfb => cfb(&BlockKey::new(&cmd.key)?, &cmd.iv, cmd.direction, &cmd.text),
            Submode::Gcm => gcm(&cmd.key, &cmd.iv, &cmd.aad, cmd.direction, &cmd.text),
        }
    }
}

impl Transport for SoftCoprocessor {
    fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn command(&mut self, command: &[u8]) -> KatResult<Vec<u8>> {
        self.commands_executed += 1;
        let (subcommand, payload) = frame::parse_ext_command(command)?;
        self.last_command = Some(payload.to_vec());

        let (return_code, body) = match subcommand {
            AES_SUBCOMMAND => match self.execute_aes(payload) {
                Ok(body) => (VENDOR_RC_SUCCESS, body),
                Err(rc) => (rc, Vec::new()),
            },
            _ => (VENDOR_RC_NO_SUCH_SUBCOMMAND, Vec::new()),
        };

        if self.debug {
            debug!("soft coprocessor: rc {:#x}, response {}", return_code, hex_dump(&body));
        }
        Ok(frame::wrap_ext_response(subcommand, return_code, &body))
    }
}

/// AES block cipher keyed for any of the three key sizes
enum BlockKey {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockKey {
    fn new(key: &[u8]) -> Result<Self, u32> {
        let cipher = match key.len() {
            16 => Aes128::new_from_slice(key).map(BlockKey::Aes128),
            24 => Aes192::new_from_slice(key).map(BlockKey::Aes192),
            32 => Aes256::new_from_slice(key).map(BlockKey::Aes256),
            _ => return Err(VENDOR_RC_BOGUS_ARGS),
        };
        cipher.map_err(|_| VENDOR_RC_BOGUS_ARGS)
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        let block = aes::Block::from_mut_slice(block);
        match self {
            BlockKey::Aes128(cipher) => cipher.encrypt_block(block),
            BlockKey::Aes192(cipher) => cipher.encrypt_block(block),
            BlockKey::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        let block = aes::Block::from_mut_slice(block);
        match self {
            BlockKey::Aes128(cipher) => cipher.decrypt_block(block),
            BlockKey::Aes192(cipher) => cipher.decrypt_block(block),
            BlockKey::Aes256(cipher) => cipher.decrypt_block(block),
        }
    }
}

fn pad_to_blocks(text: &[u8]) -> Vec<u8> {
    let mut buf = text.to_vec();
    let padded_len = text.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
    buf.resize(padded_len, 0);
    buf
}

fn iv_block(iv: &[u8]) -> Result<[u8; BLOCK_SIZE], u32> {
    iv.try_into().map_err(|_| VENDOR_RC_BOGUS_ARGS)
}

fn xor_in_place(data: &mut [u8], keystream: &[u8]) {
    for (byte, key) in data.iter_mut().zip(keystream) {
        *byte ^= key;
    }
}

fn ecb(key: &BlockKey, direction: Direction, text: &[u8]) -> Result<Vec<u8>, u32> {
    let mut buf = pad_to_blocks(text);
    for block in buf.chunks_exact_mut(BLOCK_SIZE) {
        match direction {
            Direction::Encrypt => key.encrypt_block(block),
            Direction::Decrypt => key.decrypt_block(block),
        }
    }
    Ok(buf)
}

fn cbc_crypt(key: &[u8], iv: &[u8], direction: Direction, text: &[u8]) -> Result<Vec<u8>, u32> {
    let mut buf = pad_to_blocks(text);
    let len = buf.len();
    with_aes!(key, C => {
        match direction {
            Direction::Encrypt => {
                cbc::Encryptor::<C>::new_from_slices(key, iv)
                    .map_err(|_| VENDOR_RC_BOGUS_ARGS)?
                    .encrypt_padded_mut::<NoPadding>(&mut buf, len)
                    .map_err(|_| VENDOR_RC_INTERNAL_ERROR)?;
            }
            Direction::Decrypt => {
                cbc::Decryptor::<C>::new_from_slices(key, iv)
                    .map_err(|_| VENDOR_RC_BOGUS_ARGS)?
                    .decrypt_padded_mut::<NoPadding>(&mut buf)
                    .map_err(|_| VENDOR_RC_INTERNAL_ERROR)?;
            }
        }
        Ok(buf)
    })
}

fn ctr_crypt(key: &[u8], iv: &[u8], text: &[u8]) -> Result<Vec<u8>, u32> {
    let mut buf = text.to_vec();
    with_aes!(key, C => {
        let mut cipher = ctr::Ctr128BE::<C>::new_from_slices(key, iv)
            .map_err(|_| VENDOR_RC_BOGUS_ARGS)?;
        cipher.apply_keystream(&mut buf);
        Ok(buf)
    })
}

fn ofb(key: &BlockKey, iv: &[u8], text: &[u8]) -> Result<Vec<u8>, u32> {
    let mut feedback = iv_block(iv)?;
    let mut buf = text.to_vec();
    for chunk in buf.chunks_mut(BLOCK_SIZE) {
        key.encrypt_block(&mut feedback);
        xor_in_place(chunk, &feedback);
    }
    Ok(buf)
}

fn cfb(key: &BlockKey, iv: &[u8], direction: Direction, text: &[u8]) -> Result<Vec<u8>, u32> {
    let mut feedback = iv_block(iv)?;
    let mut buf = text.to_vec();
    for chunk in buf.chunks_mut(BLOCK_SIZE) {
        let mut keystream = feedback;
        key.encrypt_block(&mut keystream);
        // Feedback is always the cipher text block
        match direction {
            Direction::Encrypt => {
                xor_in_place(chunk, &keystream);
                feedback[..chunk.len()].copy_from_slice(chunk);
            }
            Direction::Decrypt => {
                feedback[..chunk.len()].copy_from_slice(chunk);
                xor_in_place(chunk, &keystream);
            }
        }
    }
    Ok(buf)
}

fn gcm(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    direction: Direction,
    text: &[u8],
) -> Result<Vec<u8>, u32> {
    match direction {
        Direction::Encrypt => gcm_seal(key, iv, aad, text),
        Direction::Decrypt => {
            // GCM shares one keystream in both directions: sealing the cipher
            // text yields the clear text, and sealing that yields the tag.
            let opened = gcm_seal(key, iv, aad, text)?;
            let clear = &opened[..text.len()];
            let resealed = gcm_seal(key, iv, aad, clear)?;
            Ok(concat_bytes(&[clear, &resealed[text.len()..]]))
        }
    }
}

/// Seal with the nonce size matching `$iv`, for every supported IV length
macro_rules! seal_with_nonce {
    ($cipher:ty, $key:expr, $iv:expr, $aad:expr, $text:expr; $($len:literal => $size:ty),+) => {
        match $iv.len() {
            $($len => seal::<AesGcm<$cipher, $size>>($key, $iv, $aad, $text),)+
            _ => Err(VENDOR_RC_BOGUS_ARGS),
        }
    };
}

/// GCM accepts IVs of 1 to 16 bytes; 12-byte IVs take the direct counter
/// path, every other length is hashed into the initial counter.
fn gcm_seal(key: &[u8], iv: &[u8], aad: &[u8], text: &[u8]) -> Result<Vec<u8>, u32> {
    with_aes!(key, C => seal_with_nonce!(C, key, iv, aad, text;
        1 => U1, 2 => U2, 3 => U3, 4 => U4, 5 => U5, 6 => U6, 7 => U7, 8 => U8,
        9 => U9, 10 => U10, 11 => U11, 12 => U12, 13 => U13, 14 => U14, 15 => U15, 16 => U16
    ))
}

fn seal<A: AeadInPlace + KeyInit>(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    text: &[u8],
) -> Result<Vec<u8>, u32> {
    let cipher = A::new_from_slice(key).map_err(|_| VENDOR_RC_BOGUS_ARGS)?;
    let mut buf = text.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(iv), aad, &mut buf)
        .map_err(|_| VENDOR_RC_INTERNAL_ERROR)?;
    buf.extend_from_slice(&tag);
    Ok(buf)
}
