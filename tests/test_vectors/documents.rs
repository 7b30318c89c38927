// Known-answer vector documents
// Values come from FIPS-197, SP 800-38A and the McGrew-Viega GCM test cases

use std::io::Write;

use tempfile::NamedTempFile;

pub const SP800_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
pub const SP800_IV: &str = "000102030405060708090a0b0c0d0e0f";
pub const SP800_CTR_IV: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";
pub const SP800_BLOCK: &str = "6bc1bee22e409f96e93d7e117393172a";

/// Convert byte-order hex into the documents' word-swapped notation
pub fn doc_hex(bytes_hex: &str) -> String {
    let bytes = hex::decode(bytes_hex).expect("test hex must be valid");
    let mut words = bytes.chunks_exact(4);
    let mut out: Vec<String> = (&mut words)
        .map(|w| hex::encode([w[3], w[2], w[1], w[0]]))
        .collect();
    if !words.remainder().is_empty() {
        out.push(hex::encode(words.remainder()));
    }
    out.join(" ")
}

/// One `<crypto_test>` element with the given fields
pub fn vector(name: &str, fields: &[(&str, String)]) -> String {
    let mut xml = format!("  <crypto_test name=\"{}\">\n", name);
    for (tag, value) in fields {
        let (tag_name, format) = match tag.split_once('/') {
            Some((tag_name, format)) => (tag_name, format!(" format=\"{}\"", format)),
            None => (*tag, String::new()),
        };
        xml.push_str(&format!("    <{0}{1}>\n      {2}\n    </{0}>\n", tag_name, format, value));
    }
    xml.push_str("  </crypto_test>\n");
    xml
}

pub fn document(vectors: &[String]) -> String {
    format!("<?xml version=\"1.0\"?>\n<crypto_tests>\n{}</crypto_tests>\n", vectors.concat())
}

pub fn write_document(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp document");
    file.write_all(xml.as_bytes()).expect("write temp document");
    file
}

/// Every submode the coprocessor implements, with known answers where
/// published ones exist
pub fn known_answer_suite() -> String {
    document(&[
        vector(
            "AES:ECB FIPS-197 zero",
            &[
                ("key", doc_hex(&"00".repeat(16))),
                ("clear_text/hex", doc_hex(&"00".repeat(16))),
                ("cipher_text", doc_hex("66e94bd4ef8a2c3b884cfa59ca342b2e")),
            ],
        ),
        vector(
            "AES:ECB F.1.1",
            &[
                ("key", doc_hex(SP800_KEY)),
                ("clear_text/hex", doc_hex(SP800_BLOCK)),
                ("cipher_text", doc_hex("3ad77bb40d7a3660a89ecaf32466ef97")),
            ],
        ),
        vector(
            "AES:CBC F.2.1",
            &[
                ("key", doc_hex(SP800_KEY)),
                ("iv", doc_hex(SP800_IV)),
                ("clear_text/hex", doc_hex(SP800_BLOCK)),
                ("cipher_text", doc_hex("7649abac8119b246cee98e9b12e9197d")),
            ],
        ),
        vector(
            "AES:OFB F.4.1",
            &[
                ("key", doc_hex(SP800_KEY)),
                ("iv", doc_hex(SP800_IV)),
                ("clear_text/hex", doc_hex(SP800_BLOCK)),
                ("cipher_text", doc_hex("3b3fd92eb72dad20333449f8e83cfb4a")),
            ],
        ),
        vector(
            "AES:CFB F.3.13",
            &[
                ("key", doc_hex(SP800_KEY)),
                ("iv", doc_hex(SP800_IV)),
                ("clear_text/hex", doc_hex(SP800_BLOCK)),
                ("cipher_text", doc_hex("3b3fd92eb72dad20333449f8e83cfb4a")),
            ],
        ),
        vector(
            "AES:CTR F.5.1",
            &[
                ("key", doc_hex(SP800_KEY)),
                ("iv", doc_hex(SP800_CTR_IV)),
                ("clear_text/hex", doc_hex(SP800_BLOCK)),
                ("cipher_text", doc_hex("874d6191b620e3261bef6864990db6ce")),
            ],
        ),
        vector(
            "AES:GCM case 1",
            &[
                ("key", doc_hex(&"00".repeat(16))),
                ("iv", doc_hex(&"00".repeat(12))),
                ("tag", doc_hex("58e2fccefa7e3061367f1d57a4e7455a")),
            ],
        ),
        vector(
            "AES:GCM case 2",
            &[
                ("key", doc_hex(&"00".repeat(16))),
                ("iv", doc_hex(&"00".repeat(12))),
                ("clear_text/hex", doc_hex(&"00".repeat(16))),
                ("cipher_text", doc_hex("0388dace60b6a392f328c2b971b2fe78")),
                ("tag", doc_hex("ab6e47d42cec13bdf53a67b21257bddf")),
            ],
        ),
    ])
}

/// Vectors without published answers: only the round trip is checked
pub fn round_trip_suite() -> String {
    document(&[
        vector(
            "AES:CBC ascii",
            &[
                ("key", doc_hex(&"2b".repeat(24))),
                ("iv", doc_hex(&"01".repeat(16))),
                ("clear_text", "Lorem ipsum dolor sit amet, consectetur".to_string()),
            ],
        ),
        vector(
            "AES:GCM aad",
            &[
                ("key", doc_hex(&"7f".repeat(32))),
                ("iv", doc_hex(&"11".repeat(12))),
                ("aad", doc_hex("feedfacedeadbeeffeedfacedeadbeefabaddad2")),
                ("clear_text", "authenticated".to_string()),
            ],
        ),
        vector(
            "aes:ctr lowercase",
            &[
                ("key", doc_hex(&"42".repeat(32))),
                ("iv", doc_hex(&"24".repeat(16))),
                ("clear_text", "x".to_string()),
            ],
        ),
    ])
}
