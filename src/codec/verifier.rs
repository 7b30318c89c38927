use log::{debug, info, warn};
use serde::Serialize;

use super::command::{CryptoCommand, Direction};
use super::modes::CipherMode;
use crate::device::Transport;
use crate::error::{KatError, KatResult};
use crate::utils::hex_dump;
use crate::vectors::{Record, TestVector};

/// Result of a vector that passed both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorOutcome {
    pub name: String,
    pub mode: String,
    /// Bytes returned by the encrypt pass, tag and padding included
    pub encrypt_output_len: usize,
    /// Bytes returned by the decrypt pass, tag and padding included
    pub decrypt_output_len: usize,
}

/// Drives cipher commands through a transport and checks the results
#[derive(Debug)]
pub struct Verifier<T: Transport> {
    transport: T,
}

impl<T: Transport> Verifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Run one operation on the device and compare against `expected`.
    ///
    /// The device may return more than expected (block padding, for example);
    /// only the first `expected.len()` bytes are compared. An empty
    /// `expected` skips the comparison. The full device output is returned.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        node_name: &str,
        direction: Direction,
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
        input: &[u8],
        expected: &[u8],
    ) -> KatResult<Vec<u8>> {
        let mode = CipherMode::lookup(node_name)?;
        let cmd = CryptoCommand::new(direction, mode.submode.id(), key, iv, aad, input)
            .encode(node_name)?;

        let debug_enabled = self.transport.debug_enabled();
        if debug_enabled {
            debug!(
                "{}:{} cmd size {} {}",
                direction as u8,
                mode.subcommand,
                cmd.len(),
                hex_dump(&cmd)
            );
        }

        let frame = self.transport.wrap_ext_command(mode.subcommand, &cmd);
        let response = self.transport.command(&frame)?;
        let actual = self
            .transport
            .unwrap_ext_response(mode.subcommand, &response)?;

        if !expected.is_empty() {
            let compared = &actual[..actual.len().min(expected.len())];
            if compared != expected {
                if !debug_enabled {
                    return Err(KatError::OutputMismatch {
                        node: node_name.to_string(),
                        operation: direction.label(),
                        input: input.to_vec(),
                        expected: expected.to_vec(),
                        actual: compared.to_vec(),
                    });
                }
                warn!(
                    "Out text mismatch in node {}, operation {}:\nExpected out text:{}Real out text:{}",
                    node_name,
                    direction,
                    hex_dump(expected),
                    hex_dump(compared)
                );
            }
        }

        Ok(actual)
    }

    /// Decode one record and check it in both directions.
    ///
    /// The encrypt pass must produce the expected cipher text and tag. Its
    /// output, tag stripped, is then decrypted and must give back the clear
    /// text followed by the same tag.
    pub fn run_vector(&mut self, record: &Record) -> KatResult<VectorOutcome> {
        let vector = TestVector::from_record(record)?;
        let mode = CipherMode::lookup(&vector.name)?;

        let produced = self.run(
            &vector.name,
            Direction::Encrypt,
            &vector.key,
            &vector.iv,
            &vector.aad,
            &vector.clear_text,
            &vector.expected_encrypt_output(),
        )?;

        let cipher_len = produced.len().saturating_sub(vector.tag.len());
        let recovered = self.run(
            &vector.name,
            Direction::Decrypt,
            &vector.key,
            &vector.iv,
            &vector.aad,
            &produced[..cipher_len],
            &vector.expected_decrypt_output(),
        )?;

        info!("SUCCESS: {}", vector.name);
        Ok(VectorOutcome {
            name: vector.name.clone(),
            mode: mode.to_string(),
            encrypt_output_len: produced.len(),
            decrypt_output_len: recovered.len(),
        })
    }
}
