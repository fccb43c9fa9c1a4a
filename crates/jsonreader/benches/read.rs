//! Benchmark – `jsonreader::TextReader` across input encodings
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonreader::TextReader;

/// Produce a deterministic document of roughly `records` array elements, each
/// a small object mixing strings, numbers and literals.
fn make_json_payload(records: usize) -> String {
    let mut s = String::from("[");
    for i in 0..records {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(
            r#"{{"id":{i},"name":"item-{i}","score":{}.25,"tags":["a","bé"],"ok":true,"next":null}}"#,
            i % 97
        ));
    }
    s.push(']');
    s
}

fn encode_utf16le(text: &str) -> Vec<u8> {
    [0xFF, 0xFE]
        .into_iter()
        .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
        .collect()
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_encoding");

    for &records in &[100usize, 10_000] {
        let text = make_json_payload(records);
        let utf16 = encode_utf16le(&text);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("text", records), &text, |b, text| {
            b.iter(|| TextReader::from_text(black_box(text)).read().unwrap());
        });
        group.bench_with_input(
            BenchmarkId::new("utf8", records),
            text.as_bytes(),
            |b, bytes| {
                b.iter(|| jsonreader::from_slice(black_box(bytes)).unwrap());
            },
        );
        group.bench_with_input(BenchmarkId::new("utf16le", records), &utf16, |b, bytes| {
            b.iter(|| jsonreader::from_slice(black_box(bytes)).unwrap());
        });
    }
    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_nesting");

    for &depth in &[1_000usize, 100_000] {
        let mut text = "[".repeat(depth);
        text.push_str(&"]".repeat(depth));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &text, |b, text| {
            b.iter(|| jsonreader::from_str(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_encodings, bench_nesting }
criterion_main!(benches);
