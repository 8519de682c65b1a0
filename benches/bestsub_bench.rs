//! Criterion benchmarks for topic-subset search.
//!
//! Uses synthetic AP matrices so timings reflect the search and the
//! correlation kernels rather than any particular collection.

use bestsub::ga::multi_objective::non_dominated_sort;
use bestsub::subset::{SubsetConfig, SubsetRunner};
use bestsub::{Correlation, Dataset, Target};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};

fn synthetic_dataset(systems: usize, topics: usize) -> Dataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let rows = (0..systems)
        .map(|s| {
            let skill = s as f64 / systems as f64;
            (0..topics)
                .map(|_| (0.6 * skill + 0.4 * rng.random_range(0.0..1.0)).min(1.0))
                .collect()
        })
        .collect();
    Dataset::new(
        (0..systems).map(|s| format!("run{s}")).collect(),
        (0..topics).map(|t| format!("{}", 301 + t)).collect(),
        rows,
    )
    .expect("synthetic dataset is valid")
}

// ===========================================================================
// Correlation kernels
// ===========================================================================

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for &n in &[20, 100, 500] {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let a: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
        let b: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
        for method in [Correlation::Pearson, Correlation::Kendall] {
            group.bench_with_input(
                BenchmarkId::new(method.name(), n),
                &(a.clone(), b.clone()),
                |bench, (a, b)| bench.iter(|| method.correlate(black_box(a), black_box(b))),
            );
        }
    }
    group.finish();
}

// ===========================================================================
// Evolutionary search
// ===========================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &(systems, topics) in &[(20, 25), (50, 50), (100, 50)] {
        let dataset = synthetic_dataset(systems, topics);
        let config = SubsetConfig::default()
            .with_target(Target::Best)
            .with_max_evaluations(2_000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("s{systems}_t{topics}")),
            &(dataset, config),
            |b, (d, c)| {
                b.iter(|| {
                    let outcome = SubsetRunner::solve(black_box(d), black_box(c));
                    black_box(outcome)
                })
            },
        );
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for &topics in &[25, 50, 100] {
        let dataset = synthetic_dataset(50, topics);
        let config = SubsetConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(topics),
            &(dataset, config),
            |b, (d, c)| {
                b.iter(|| {
                    let baseline = SubsetRunner::sample(black_box(d), black_box(c));
                    black_box(baseline)
                })
            },
        );
    }
    group.finish();
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");

    for &n in &[100, 400] {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let objectives: Vec<[f64; 2]> = (0..n)
            .map(|_| [rng.random_range(-1.0..1.0), rng.random_range(1..50) as f64])
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &objectives, |b, o| {
            b.iter(|| black_box(non_dominated_sort(black_box(o))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_correlation, bench_solve, bench_sample, bench_sorting);
criterion_main!(benches);
