#![no_main]

use libfuzzer_sys::fuzz_target;
use tpm_crypto_kat::vectors::{decode_field, decode_hex_words, FieldValue, Record};

fuzz_target!(|text: &str| {
    if let Ok(bytes) = decode_hex_words(text) {
        // Every two digits make one byte
        assert_eq!(bytes.len() * 2, text.len());
    }

    // Field decoding must fail cleanly, never panic
    let record = Record::new("AES:ECB fuzz")
        .field("key", FieldValue::new(text))
        .field("clear_text", FieldValue::with_format(text, "hex"));
    let _ = decode_field(&record, "key", true);
    let _ = decode_field(&record, "clear_text", false);
});
