//! Benchmarks for index construction and propagation.
//!
//! The synthetic log is a ring: user `i` is active on computer `i`, and
//! computer `i` shows users `i + 1` and `i + 7`, so one seed reaches the whole
//! graph.

#![allow(missing_docs)]

use breachtrace::domain::{AccessRecord, ActivityRecord, UserId};
use breachtrace::index::LogIndex;
use breachtrace::propagation::analyze;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn ring(size: usize) -> (Vec<ActivityRecord>, Vec<AccessRecord>) {
    let activity = (0..size)
        .map(|i| ActivityRecord::new(format!("U{i}"), format!("C{i}")))
        .collect();
    let access = (0..size)
        .flat_map(|i| {
            [1, 7].map(|step| {
                AccessRecord::new(format!("C{i}"), format!("U{}", (i + step) % size), "login")
            })
        })
        .collect();
    (activity, access)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    for size in [1_000, 10_000] {
        let (activity, access) = ring(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| LogIndex::from_records(activity.clone(), access.clone()));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in [1_000, 10_000] {
        let (activity, access) = ring(size);
        let index = LogIndex::from_records(activity, access);
        let seed = UserId::from("U0");
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| analyze(black_box(&index), black_box(&seed)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_analyze);
criterion_main!(benches);
