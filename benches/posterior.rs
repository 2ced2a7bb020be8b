//! Criterion benchmarks for grid estimation and variant comparison.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use posterior_grid::bayesian::{estimate, Comparator, GridApproximation, StepPrior, VariantCounts};

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");

    for grid_points in [40, 1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("grid_points", grid_points),
            grid_points,
            |b, &n| {
                b.iter(|| estimate(black_box(n), black_box(9), black_box(6)).expect("valid"));
            },
        );
    }

    group.finish();
}

fn bench_step_prior(c: &mut Criterion) {
    let prior = StepPrior::new(0.5).expect("valid threshold");
    let approx = GridApproximation::new(1_000).with_prior(prior);

    c.bench_function("estimate/step_prior", |b| {
        b.iter(|| approx.fit(black_box(9), black_box(6)).expect("valid"));
    });
}

fn bench_summaries(c: &mut Criterion) {
    let posterior = estimate(1_000, 9, 6).expect("valid");

    c.bench_function("summaries/percentile_interval", |b| {
        b.iter(|| posterior.percentile_interval(black_box(0.89)).expect("valid"));
    });
    c.bench_function("summaries/sample_1000", |b| {
        b.iter(|| posterior.sample(1_000, black_box(42)).expect("valid"));
    });
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let a = VariantCounts::new(15, 30).expect("valid");
    let b = VariantCounts::new(25, 30).expect("valid");

    for points in [100, 1_000, 5_000].iter() {
        let comparator = Comparator::new().with_curve_points(*points);
        group.bench_with_input(BenchmarkId::new("curve_points", points), points, |bench, _| {
            bench.iter(|| comparator.compare(black_box(a), black_box(b)).expect("valid"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_estimate,
    bench_step_prior,
    bench_summaries,
    bench_compare
);
criterion_main!(benches);
