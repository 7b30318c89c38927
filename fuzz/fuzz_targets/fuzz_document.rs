#![no_main]

use libfuzzer_sys::fuzz_target;
use tpm_crypto_kat::vectors::{parse_document, TestVector};

fuzz_target!(|xml: &str| {
    if let Ok(records) = parse_document(xml) {
        for record in &records {
            let _ = TestVector::from_record(record);
        }
    }
});
