/*!
 * Test vector decoding
 *
 * Reads vector documents into records and decodes each record's fields into
 * the exact binary payloads sent to the coprocessor.
 */

mod decoder;
mod document;
mod vector;

pub use decoder::*;
pub use document::*;
pub use vector::*;
