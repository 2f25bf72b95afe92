//! Criterion benchmarks for the decomposition search.
//!
//! Covers: small exhaustive searches, a cap-bound search over a full
//! 255-entry table, sequential vs parallel execution, and decoding.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use sake_core::{DenominationTable, NeverStop, decode};
use sake_search::{Decomposer, DecompositionRequest, SearchConfig, decompose};

fn std_table() -> DenominationTable {
    DenominationTable::new(vec![100, 50, 20, 10, 5, 2, 1]).expect("valid table")
}

/// 255 even denominations 510, 508, ..., 2.
fn dense_table() -> DenominationTable {
    DenominationTable::new((1..=255u64).rev().map(|i| 2 * i).collect()).expect("valid table")
}

fn bench_small(c: &mut Criterion) {
    let table = std_table();

    c.bench_function("decompose_123_max4", |b| {
        b.iter(|| decompose(black_box(123), 0, 4, &table))
    });

    c.bench_function("decompose_187_max8_tol3", |b| {
        b.iter(|| decompose(black_box(187), 3, 8, &table))
    });
}

fn bench_capped(c: &mut Criterion) {
    let table = dense_table();
    let request = DecompositionRequest::new(2_401, 100, 8);
    let sequential = Decomposer::default();
    let parallel = Decomposer::new(SearchConfig {
        parallel: true,
        ..SearchConfig::default()
    })
    .expect("valid config");

    c.bench_function("dense_sequential_to_cap", |b| {
        b.iter(|| sequential.run(&table, black_box(request), &NeverStop))
    });

    c.bench_function("dense_parallel_to_cap", |b| {
        b.iter(|| parallel.run(&table, black_box(request), &NeverStop))
    });
}

fn bench_decode(c: &mut Criterion) {
    let usable = [100, 50, 20, 10, 5, 2, 1];

    c.bench_function("decode_8_picks", |b| {
        b.iter(|| decode(black_box(0x0001_0203_0405_0606), 8, &usable))
    });
}

criterion_group!(benches, bench_small, bench_capped, bench_decode);
criterion_main!(benches);
