//! TPM vendor extension framing.
//!
//! Command and response frames share one big-endian header:
//! `tag:u16 | size:u32 | code:u32 | subcommand:u16`, where `size` covers the
//! whole frame and `code` is the extension command code on the way in and
//! the return code on the way out.

use crate::error::{KatError, KatResult};

/// `TPM_ST_NO_SESSIONS`
pub const TPM_ST_NO_SESSIONS: u16 = 0x8001;
/// Command code of vendor extension commands
pub const EXTENSION_COMMAND: u32 = 0xbacc_d00a;
/// Size of the shared frame header
pub const HEADER_SIZE: usize = 12;

/// Vendor return codes
pub const VENDOR_RC_SUCCESS: u32 = 0;
pub const VENDOR_RC_BOGUS_ARGS: u32 = 1;
pub const VENDOR_RC_INTERNAL_ERROR: u32 = 6;
pub const VENDOR_RC_NO_SUCH_SUBCOMMAND: u32 = 8;

/// Decoded frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub tag: u16,
    pub size: u32,
    pub code: u32,
    pub subcommand: u16,
}

impl FrameHeader {
    fn parse(frame: &[u8]) -> Option<Self> {
        let header = frame.get(..HEADER_SIZE)?;
        Some(Self {
            tag: u16::from_be_bytes([header[0], header[1]]),
            size: u32::from_be_bytes([header[2], header[3], header[4], header[5]]),
            code: u32::from_be_bytes([header[6], header[7], header[8], header[9]]),
            subcommand: u16::from_be_bytes([header[10], header[11]]),
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.tag.to_be_bytes());
        out.extend_from_slice(&self.size.to_be_bytes());
        out.extend_from_slice(&self.code.to_be_bytes());
        out.extend_from_slice(&self.subcommand.to_be_bytes());
    }
}

fn frame(code: u32, subcommand: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
    FrameHeader {
        tag: TPM_ST_NO_SESSIONS,
        size: (HEADER_SIZE + body.len()) as u32,
        code,
        subcommand,
    }
    .write(&mut out);
    out.extend_from_slice(body);
    out
}

fn checked_body<'a>(
    operation: &str,
    frame: &'a [u8],
) -> KatResult<(FrameHeader, &'a [u8])> {
    let header = FrameHeader::parse(frame).ok_or_else(|| {
        KatError::device_error(operation, &format!("frame too short: {} bytes", frame.len()))
    })?;
    if header.tag != TPM_ST_NO_SESSIONS {
        return Err(KatError::device_error(
            operation,
            &format!("wrong tag {:#06x}", header.tag),
        ));
    }
    if header.size as usize != frame.len() {
        return Err(KatError::device_error(
            operation,
            &format!(
                "size mismatch: header says {}, frame is {} bytes",
                header.size,
                frame.len()
            ),
        ));
    }
    Ok((header, &frame[HEADER_SIZE..]))
}

/// Wrap a subcommand payload into an extension command frame
pub fn wrap_ext_command(subcommand: u16, payload: &[u8]) -> Vec<u8> {
    frame(EXTENSION_COMMAND, subcommand, payload)
}

/// Validate an extension response frame and return its body
pub fn unwrap_ext_response(subcommand: u16, response: &[u8]) -> KatResult<Vec<u8>> {
    let (header, body) = checked_body("unwrap response", response)?;
    if header.code != VENDOR_RC_SUCCESS {
        return Err(KatError::device_error(
            "unwrap response",
            &format!("device returned code {:#x}", header.code),
        ));
    }
    if header.subcommand != subcommand {
        return Err(KatError::device_error(
            "unwrap response",
            &format!(
                "subcommand mismatch: sent {}, got {}",
                subcommand, header.subcommand
            ),
        ));
    }
    Ok(body.to_vec())
}

/// Device side: split an extension command frame into subcommand and payload
pub fn parse_ext_command(command: &[u8]) -> KatResult<(u16, &[u8])> {
    let (header, body) = checked_body("parse command frame", command)?;
    if header.code != EXTENSION_COMMAND {
        return Err(KatError::device_error(
            "parse command frame",
            &format!("not an extension command: {:#x}", header.code),
        ));
    }
    Ok((header.subcommand, body))
}

/// Device side: build a response frame
pub fn wrap_ext_response(subcommand: u16, return_code: u32, body: &[u8]) -> Vec<u8> {
    frame(return_code, subcommand, body)
}
