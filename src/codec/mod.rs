/*!
 * Command codec and verifier
 *
 * Encodes vectors into the coprocessor's cipher command layout, dispatches
 * them through a transport and checks the results in both directions.
 */

mod command;
mod modes;
mod verifier;

pub use command::*;
pub use modes::*;
pub use verifier::*;
