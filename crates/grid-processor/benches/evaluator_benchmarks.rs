//! Benchmarks for price estimation and grid evaluation.
//!
//! Run with: cargo bench --package grid-processor --bench evaluator_benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grid_processor::{DensityEstimator, GridEvaluator, PriceEstimator};
use heatmap_common::{EvaluatorConfig, GeoSample};
use projection::CoordinateMapper;
use rand::Rng;
use test_utils::{small_config, STOCKHOLM};

/// Uniformly scattered sales inside the reference area.
fn random_samples(count: usize) -> Vec<GeoSample> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            GeoSample::new(
                rng.gen_range(STOCKHOLM.lon_lo..STOCKHOLM.lon_hi),
                rng.gen_range(STOCKHOLM.lat_lo..STOCKHOLM.lat_hi),
                rng.gen_range(20000.0..90000.0),
            )
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("density_estimate");
    let estimator = DensityEstimator::default();
    let lon = (STOCKHOLM.lon_lo + STOCKHOLM.lon_hi) / 2.0;
    let lat = (STOCKHOLM.lat_lo + STOCKHOLM.lat_hi) / 2.0;

    for count in [100usize, 1_000, 10_000] {
        let samples = random_samples(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
            b.iter(|| estimator.estimate(black_box(lon), black_box(lat), samples))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_evaluate");
    group.sample_size(10);

    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let samples: Arc<[GeoSample]> = Arc::from(random_samples(1_000));

    for workers in [1usize, 4, 8] {
        let mut config = small_config(64, 64);
        config.bounds = STOCKHOLM;
        let mapper = CoordinateMapper::from_config(&config);
        let evaluator = GridEvaluator::new(64, 64, mapper, DensityEstimator::default())
            .with_config(EvaluatorConfig {
                workers,
                queue_depth: 64,
            });

        group.throughput(Throughput::Elements(64 * 64));
        group.bench_with_input(BenchmarkId::new("workers", workers), &evaluator, |b, evaluator| {
            b.iter(|| rt.block_on(evaluator.evaluate(Arc::clone(&samples))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_evaluate);
criterion_main!(benches);
