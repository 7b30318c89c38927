use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tpm_crypto_kat::{
    codec::{CryptoCommand, Direction, Submode, Verifier},
    device::SoftCoprocessor,
    utils,
    vectors::{decode_hex_words, parse_document, FieldValue, Record},
};

fn decoder_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Benchmark word-swapped hex decoding
    for size in [16, 1024, 65535].iter() {
        let text = hex::encode(vec![0xa5; *size]);
        group.bench_with_input(BenchmarkId::new("decode_hex_words", size), &text, |b, text| {
            b.iter(|| decode_hex_words(text))
        });
    }

    // Benchmark document parsing
    let mut xml = String::from("<crypto_tests>");
    for i in 0..100 {
        xml.push_str(&format!(
            "<crypto_test name=\"AES:CBC {}\"><key>{}</key><iv>{}</iv><clear_text>vector {}</clear_text></crypto_test>",
            i,
            "00".repeat(16),
            "11".repeat(16),
            i
        ));
    }
    xml.push_str("</crypto_tests>");
    group.bench_function("parse_document_100", |b| b.iter(|| parse_document(&xml)));

    group.finish();
}

fn codec_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for size in [16, 4096].iter() {
        let text = vec![0x3c; *size];
        let cmd = CryptoCommand::new(Direction::Encrypt, Submode::Gcm.id(), &[0; 32], &[0; 12], &[0; 16], &text);
        group.bench_with_input(BenchmarkId::new("encode", size), &cmd, |b, cmd| {
            b.iter(|| cmd.encode("AES:GCM"))
        });

        if let Ok(encoded) = cmd.encode("AES:GCM") {
            group.bench_with_input(BenchmarkId::new("parse", size), &encoded, |b, encoded| {
                b.iter(|| CryptoCommand::parse(encoded))
            });
        }
    }

    group.bench_function("hex_dump_256", |b| {
        let data = vec![0x42; 256];
        b.iter(|| utils::hex_dump(&data))
    });

    group.finish();
}

fn verifier_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("verifier");

    for mode in ["AES:ECB", "AES:CBC", "AES:CTR", "AES:GCM"].iter() {
        let iv = if *mode == "AES:GCM" { "00".repeat(12) } else { "00".repeat(16) };
        let mut record = Record::new(mode)
            .field("key", FieldValue::new(&"00".repeat(32)))
            .field("clear_text", FieldValue::new(&"benchmark text ".repeat(64)));
        if *mode != "AES:ECB" {
            record.push_field("iv", FieldValue::new(&iv));
        }

        let mut verifier = Verifier::new(SoftCoprocessor::new());
        group.bench_with_input(BenchmarkId::new("run_vector", mode), &record, |b, record| {
            b.iter(|| verifier.run_vector(record))
        });
    }

    group.finish();
}

criterion_group!(benches, decoder_benchmarks, codec_benchmarks, verifier_benchmarks);
criterion_main!(benches);
