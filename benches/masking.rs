// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for the masking hot path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use logmask::{MaskableProperties, MessageMasker};

fn catalog() -> MaskableProperties {
    MaskableProperties::new(["password", "api_key", "ssn", "client_secret", "tokens"])
}

fn bench_masker_construction(c: &mut Criterion) {
    c.bench_function("masker_construction", |b| {
        b.iter(|| MessageMasker::new(black_box(catalog())))
    });
}

fn bench_clean_message(c: &mut Criterion) {
    let masker = MessageMasker::new(catalog());
    let text = "worker finished replication batch 4817 in 312ms without incident";

    c.bench_function("mask_clean_message", |b| {
        b.iter(|| masker.mask(black_box(text)))
    });
}

fn bench_property_heavy_message(c: &mut Criterion) {
    let masker = MessageMasker::new(catalog());
    let text = r#"saved config {"host": "db", "password": "hunter2", "api_key": "k-123", "tokens": ["a","b"], "port": 5432}"#;

    c.bench_function("mask_property_heavy_message", |b| {
        b.iter(|| masker.mask(black_box(text)))
    });
}

fn bench_known_pii_scrub(c: &mut Criterion) {
    let masker = MessageMasker::new(catalog());
    let text = r#"destination-x > ERROR Received invalid message: {"ssn":"123-45-6789","name":"jane"}"#;

    c.bench_function("scrub_known_shape", |b| {
        b.iter(|| masker.mask(black_box(text)))
    });
}

fn bench_large_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_large_message");
    let masker = MessageMasker::new(catalog());

    for lines in [100, 1000, 5000] {
        let mut text = String::new();
        for i in 0..lines {
            text.push_str(&format!(
                "record {i}: {{\"password\": \"p-{i}\", \"seq\": {i}}}\n"
            ));
        }

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| masker.mask(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_masker_construction,
    bench_clean_message,
    bench_property_heavy_message,
    bench_known_pii_scrub,
    bench_large_message,
);

criterion_main!(benches);
