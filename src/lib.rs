/*!
 * TPM Crypto Known-Answer Harness
 *
 * This crate checks the symmetric cipher extension command of a TPM
 * cryptographic coprocessor against known-answer test vectors.
 *
 * A run goes through three stages:
 *
 * - Vector documents are read into records and each record's fields are
 *   decoded into the exact bytes the coprocessor expects
 * - Every vector is encoded into the cipher command layout and sent through a
 *   [`device::Transport`]
 * - The output is checked twice: the encrypt pass must produce the expected
 *   cipher text and tag, and decrypting that output must give back the clear
 *   text
 *
 * A software model of the coprocessor is included so the harness can be run
 * and tested without hardware.
 */

/// Cipher command encoding, mode registry and verification
pub mod codec;

/// Harness configuration
pub mod config;

/// Coprocessor transport and extension framing
pub mod device;

/// Common error types for the harness
pub mod error;

/// Whole-document runs and reports
pub mod suite;

/// Diagnostic helpers
pub mod utils;

/// Vector documents and field decoding
pub mod vectors;

// Re-export main types for convenience
pub use codec::{CipherMode, CryptoCommand, Direction, Submode, VectorOutcome, Verifier};
pub use config::HarnessConfig;
pub use device::{SoftCoprocessor, Transport};
pub use error::{KatError, KatResult};
pub use suite::{run_document, run_suite, SuiteReport};
pub use vectors::{load_document, parse_document, Record, TestVector};

/// The types most harness drivers need.
///
/// ```
/// use tpm_crypto_kat::prelude::*;
///
/// fn main() -> KatResult<()> {
///     let records = parse_document(
///         r#"<crypto_tests>
///              <crypto_test name="AES:ECB doc">
///                <key>00000000 00000000 00000000 00000000</key>
///                <clear_text>hello</clear_text>
///              </crypto_test>
///            </crypto_tests>"#,
///     )?;
///
///     let mut verifier = Verifier::new(SoftCoprocessor::new());
///     let report = run_suite(&mut verifier, &records)?;
///     assert_eq!(report.passed(), 1);
///     Ok(())
/// }
/// ```
pub mod prelude {
    pub use crate::codec::{CipherMode, Direction, Submode, Verifier};
    pub use crate::config::HarnessConfig;
    pub use crate::device::{SoftCoprocessor, Transport};
    pub use crate::error::{KatError, KatResult};
    pub use crate::suite::{run_document, run_suite, SuiteReport};
    pub use crate::vectors::{load_document, parse_document, FieldValue, Record, TestVector};
}
