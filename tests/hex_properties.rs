// Property tests for field decoding and the command layout

use proptest::prelude::*;

use tpm_crypto_kat::codec::{CryptoCommand, Direction, MAX_AAD_LEN};
use tpm_crypto_kat::vectors::{decode_field, decode_hex_words, FieldValue, Record};

proptest! {
    #[test]
    fn whole_words_are_swapped(words in prop::collection::vec(any::<u32>(), 0..32)) {
        let text: String = words.iter().map(|w| format!("{:08x}", w)).collect();
        let decoded = decode_hex_words(&text).unwrap();

        prop_assert_eq!(decoded.len(), text.len() / 2);
        for (chunk, word) in decoded.chunks(4).zip(&words) {
            prop_assert_eq!(chunk, &word.to_le_bytes()[..]);
        }
    }

    #[test]
    fn tail_bytes_keep_their_order(
        words in prop::collection::vec(any::<u32>(), 0..8),
        tail in prop::collection::vec(any::<u8>(), 1..4),
    ) {
        let mut text: String = words.iter().map(|w| format!("{:08x}", w)).collect();
        text.push_str(&hex::encode(&tail));

        let decoded = decode_hex_words(&text).unwrap();
        prop_assert_eq!(decoded.len(), words.len() * 4 + tail.len());
        prop_assert_eq!(&decoded[words.len() * 4..], &tail[..]);
    }

    #[test]
    fn odd_digit_counts_are_rejected(digits in "[0-9a-f]{0,40}") {
        let text = format!("{}f", digits);
        if text.len() % 2 == 1 {
            prop_assert!(decode_hex_words(&text).is_err());
        }
    }

    #[test]
    fn whitespace_is_ignored(bytes in prop::collection::vec(any::<u8>(), 0..40), split in 0usize..8) {
        let compact = hex::encode(&bytes);
        let mut spaced = String::new();
        for (i, c) in compact.chars().enumerate() {
            if split > 0 && i % (split + 1) == 0 {
                spaced.push_str(if i % 2 == 0 { " " } else { "\n\t" });
            }
            spaced.push(c);
        }

        let compact_record = Record::new("AES:ECB").field("key", FieldValue::new(&compact));
        let spaced_record = Record::new("AES:ECB").field("key", FieldValue::new(&spaced));
        prop_assert_eq!(
            decode_field(&compact_record, "key", true).unwrap(),
            decode_field(&spaced_record, "key", true).unwrap()
        );
    }

    #[test]
    fn encoded_command_parses_back(
        encrypt in any::<bool>(),
        submode in 0u8..6,
        key in prop::sample::select(vec![16usize, 24, 32]),
        iv in prop::collection::vec(any::<u8>(), 0..17),
        aad in prop::collection::vec(any::<u8>(), 0..=MAX_AAD_LEN),
        text in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let direction = if encrypt { Direction::Encrypt } else { Direction::Decrypt };
        let key = vec![0x5a; key];
        let cmd = CryptoCommand::new(direction, submode, &key, &iv, &aad, &text);

        let encoded = cmd.encode("AES:any").unwrap();
        prop_assert_eq!(encoded.len(), 6 + key.len() + iv.len() + aad.len() + text.len());
        prop_assert_eq!(CryptoCommand::parse(&encoded).unwrap(), cmd);
    }
}
