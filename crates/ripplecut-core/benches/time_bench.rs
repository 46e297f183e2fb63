//! Benchmarks for ripplecut-core time operations.
//!
//! Run with: cargo bench -p ripplecut-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ripplecut_core::{TimeMs, TimeSpan, VolumeEnvelope};

fn bench_time_arithmetic(c: &mut Criterion) {
    let a = TimeMs::new(3_600_000);
    let b = TimeMs::new(41_708);

    c.bench_function("time_ms_add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b));
    });

    c.bench_function("time_ms_unscale_1_5x", |bencher| {
        bencher.iter(|| black_box(a).unscale(black_box(1.5)));
    });
}

fn bench_span_queries(c: &mut Criterion) {
    let span = TimeSpan::new(TimeMs::new(5_000), TimeMs::new(12_000));
    let other = TimeSpan::new(TimeMs::new(11_000), TimeMs::new(20_000));

    c.bench_function("span_contains", |bencher| {
        bencher.iter(|| black_box(span).contains(black_box(TimeMs::new(8_000))));
    });

    c.bench_function("span_intersection", |bencher| {
        bencher.iter(|| black_box(span).intersection(black_box(other)));
    });
}

fn bench_envelope_evaluation(c: &mut Criterion) {
    // An envelope with 100 control points, alternating gain
    let mut env = VolumeEnvelope::new();
    for i in 0..100 {
        env.set(TimeMs::new(i * 250), if i % 2 == 0 { 0.2 } else { 1.8 });
    }

    c.bench_function("envelope_evaluate_100pt", |bencher| {
        bencher.iter(|| env.evaluate(black_box(TimeMs::new(12_345))));
    });

    c.bench_function("envelope_split_100pt", |bencher| {
        bencher.iter(|| env.split_at(black_box(TimeMs::new(12_345))));
    });
}

criterion_group!(
    benches,
    bench_time_arithmetic,
    bench_span_queries,
    bench_envelope_evaluation,
);
criterion_main!(benches);
