//! Benchmarks for mapcdb read operations

#[path = "../tests/common/mod.rs"]
mod common;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapcdb::Reader;

const RECORDS: usize = 10_000;

fn lookup_benchmarks(c: &mut Criterion) {
    let (_temp, path) = common::setup_temp_db();
    common::numbered_writer(RECORDS).write(&path);
    let reader = Reader::open_path(&path).unwrap();

    let keys: Vec<Vec<u8>> = (0..RECORDS)
        .step_by(97)
        .map(|i| format!("key{:05}", i).into_bytes())
        .collect();

    c.bench_function("count_hit", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(reader.count(&keys[i]).unwrap())
        })
    });

    c.bench_function("count_miss", |b| {
        b.iter(|| black_box(reader.count(b"missing-key").unwrap()))
    });

    c.bench_function("find_decompress", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(reader.find(&keys[i]).unwrap())
        })
    });

    c.bench_function("iterate_all", |b| {
        b.iter(|| black_box(reader.records().count()))
    });
}

criterion_group!(benches, lookup_benchmarks);
criterion_main!(benches);
