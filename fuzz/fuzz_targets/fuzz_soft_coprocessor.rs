#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tpm_crypto_kat::codec::{CryptoCommand, Direction, AES_SUBCOMMAND};
use tpm_crypto_kat::device::{SoftCoprocessor, Transport};

#[derive(Arbitrary, Debug)]
struct AesCommandInput {
    encrypt: bool,
    submode: u8,
    key: Vec<u8>,
    iv: Vec<u8>,
    aad: Vec<u8>,
    text: Vec<u8>,
    subcommand: Option<u16>,
}

fuzz_target!(|input: AesCommandInput| {
    let direction = if input.encrypt {
        Direction::Encrypt
    } else {
        Direction::Decrypt
    };
    let cmd = CryptoCommand::new(
        direction,
        input.submode,
        &input.key,
        &input.iv,
        &input.aad,
        &input.text,
    );
    let payload = match cmd.encode("fuzz") {
        Ok(payload) => payload,
        Err(_) => return,
    };

    let subcommand = input.subcommand.unwrap_or(AES_SUBCOMMAND);
    let mut device = SoftCoprocessor::new();
    let frame = device.wrap_ext_command(subcommand, &payload);
    // The device answers every well-formed frame, success or not
    let response = device.command(&frame).expect("well-formed frame");
    let _ = device.unwrap_ext_response(subcommand, &response);
});
