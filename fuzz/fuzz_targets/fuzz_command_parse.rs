#![no_main]

use libfuzzer_sys::fuzz_target;
use tpm_crypto_kat::codec::CryptoCommand;
use tpm_crypto_kat::device::frame;

fuzz_target!(|data: &[u8]| {
    // Anything that parses must encode back to the same bytes
    if let Ok(cmd) = CryptoCommand::parse(data) {
        if let Ok(encoded) = cmd.encode("fuzz") {
            assert_eq!(encoded, data);
        }
    }

    let _ = frame::parse_ext_command(data);
    let _ = frame::unwrap_ext_response(0, data);
});
