/*!
 * Device transport
 *
 * The harness talks to the coprocessor through the [`Transport`] capability:
 * wrap a subcommand payload into a frame, execute it, and unwrap the response.
 * Framing defaults to the TPM vendor extension format; implementors only
 * have to supply the round trip.
 */

pub mod frame;
mod soft;

pub use soft::SoftCoprocessor;

use crate::error::KatResult;

/// Blocking request/response access to a cryptographic coprocessor
pub trait Transport {
    /// Whether verbose tracing is enabled. In debug mode output mismatches
    /// are reported as warnings instead of aborting the run.
    fn debug_enabled(&self) -> bool {
        false
    }

    /// Wrap a subcommand payload into a device frame
    fn wrap_ext_command(&self, subcommand: u16, payload: &[u8]) -> Vec<u8> {
        frame::wrap_ext_command(subcommand, payload)
    }

    /// Send a frame and wait for the device's response frame
    fn command(&mut self, frame: &[u8]) -> KatResult<Vec<u8>>;

    /// Check a response frame for `subcommand` and return its body
    fn unwrap_ext_response(&self, subcommand: u16, response: &[u8]) -> KatResult<Vec<u8>> {
        frame::unwrap_ext_response(subcommand, response)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn debug_enabled(&self) -> bool {
        (**self).debug_enabled()
    }

    fn wrap_ext_command(&self, subcommand: u16, payload: &[u8]) -> Vec<u8> {
        (**self).wrap_ext_command(subcommand, payload)
    }

    fn command(&mut self, frame: &[u8]) -> KatResult<Vec<u8>> {
        (**self).command(frame)
    }

    fn unwrap_ext_response(&self, subcommand: u16, response: &[u8]) -> KatResult<Vec<u8>> {
        (**self).unwrap_ext_response(subcommand, response)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn debug_enabled(&self) -> bool {
        (**self).debug_enabled()
    }

    fn wrap_ext_command(&self, subcommand: u16, payload: &[u8]) -> Vec<u8> {
        (**self).wrap_ext_command(subcommand, payload)
    }

    fn command(&mut self, frame: &[u8]) -> KatResult<Vec<u8>> {
        (**self).command(frame)
    }

    fn unwrap_ext_response(&self, subcommand: u16, response: &[u8]) -> KatResult<Vec<u8>> {
        (**self).unwrap_ext_response(subcommand, response)
    }
}
