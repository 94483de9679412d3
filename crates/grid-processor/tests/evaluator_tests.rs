//! Tests for the concurrent grid evaluator.

use std::sync::{Arc, Mutex};

use grid_processor::{GridEvaluator, PriceEstimator};
use heatmap_common::{EvaluatorConfig, GeoBounds, GeoSample, HeatmapError};
use projection::CoordinateMapper;

/// Encodes the pixel position into the price: `lon * 1000 + lat`.
struct PositionEstimator;

impl PriceEstimator for PositionEstimator {
    fn estimate(&self, lon: f64, lat: f64, _samples: &[GeoSample]) -> Option<f64> {
        Some(lon * 1000.0 + lat)
    }
}

/// Reports no estimate west of `cutoff`.
struct CutoffEstimator {
    cutoff: f64,
}

impl PriceEstimator for CutoffEstimator {
    fn estimate(&self, lon: f64, _lat: f64, _samples: &[GeoSample]) -> Option<f64> {
        (lon >= self.cutoff).then_some(1.0)
    }
}

/// Panics on the top-left pixel only.
struct FaultyEstimator;

impl PriceEstimator for FaultyEstimator {
    fn estimate(&self, lon: f64, lat: f64, _samples: &[GeoSample]) -> Option<f64> {
        if lon == 0.0 && lat == 3.0 {
            panic!("estimator failure");
        }
        Some(1.0)
    }
}

fn no_samples() -> Arc<[GeoSample]> {
    Arc::from(Vec::<GeoSample>::new())
}

#[tokio::test]
async fn test_non_square_grid_is_fully_written() {
    // Integer degrees per pixel keep the expected values exact
    let mapper = CoordinateMapper::new(7, 3, GeoBounds::new(0.0, 7.0, 0.0, 3.0));
    let evaluator = GridEvaluator::new(7, 3, mapper, PositionEstimator).with_config(EvaluatorConfig {
        workers: 3,
        queue_depth: 4,
    });

    let result = evaluator.evaluate(no_samples()).await.unwrap();
    assert_eq!(result.results_collected, 21);
    assert_eq!(result.matrix.width(), 7);
    assert_eq!(result.matrix.height(), 3);
    assert_eq!(result.matrix.valid_count(), 21);

    for y in 0..3 {
        for x in 0..7 {
            let expected = x as f64 * 1000.0 + (3 - y) as f64;
            assert_eq!(result.matrix.get(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[tokio::test]
async fn test_missing_estimates_stay_empty() {
    let mapper = CoordinateMapper::new(4, 2, GeoBounds::new(0.0, 4.0, 0.0, 2.0));
    let evaluator = GridEvaluator::new(4, 2, mapper, CutoffEstimator { cutoff: 2.0 });

    let result = evaluator.evaluate(no_samples()).await.unwrap();
    assert_eq!(result.results_collected, 8);
    assert_eq!(result.matrix.valid_count(), 4);
    assert_eq!(result.matrix.get(1, 0), None);
    assert_eq!(result.matrix.get(2, 1), Some(1.0));
}

#[tokio::test]
async fn test_progress_reaches_completion() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mapper = CoordinateMapper::new(20, 10, GeoBounds::new(0.0, 1.0, 0.0, 1.0));
    let evaluator = GridEvaluator::new(20, 10, mapper, PositionEstimator)
        .with_progress(Arc::new(move |percent: u8| sink.lock().unwrap().push(percent)));

    evaluator.evaluate(no_samples()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] < w[1]), "progress must only increase");
    // 200 pixels: every half percent step lands on a new integer percent
    assert_eq!(seen.len(), 100);
}

#[tokio::test]
async fn test_single_worker_and_zero_queue_depth() {
    let mapper = CoordinateMapper::new(5, 5, GeoBounds::new(0.0, 5.0, 0.0, 5.0));
    let evaluator = GridEvaluator::new(5, 5, mapper, PositionEstimator).with_config(EvaluatorConfig {
        workers: 1,
        queue_depth: 0,
    });

    let result = evaluator.evaluate(no_samples()).await.unwrap();
    assert_eq!(result.results_collected, 25);
}

#[tokio::test]
async fn test_zero_workers_rejected() {
    let mapper = CoordinateMapper::new(2, 2, GeoBounds::new(0.0, 1.0, 0.0, 1.0));
    let evaluator = GridEvaluator::new(2, 2, mapper, PositionEstimator).with_config(EvaluatorConfig {
        workers: 0,
        queue_depth: 1,
    });

    let err = evaluator.evaluate(no_samples()).await.unwrap_err();
    assert!(matches!(
        err,
        HeatmapError::InvalidConfiguration { field: "workers", .. }
    ));
}

#[tokio::test]
async fn test_worker_panic_fails_evaluation() {
    let mapper = CoordinateMapper::new(4, 3, GeoBounds::new(0.0, 4.0, 0.0, 3.0));
    let evaluator = GridEvaluator::new(4, 3, mapper, FaultyEstimator).with_config(EvaluatorConfig {
        workers: 2,
        queue_depth: 1,
    });

    let err = evaluator.evaluate(no_samples()).await.unwrap_err();
    assert!(matches!(err, HeatmapError::Coordination(_)), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_multi_threaded_runtime() {
    let mapper = CoordinateMapper::new(32, 16, GeoBounds::new(0.0, 32.0, 0.0, 16.0));
    let evaluator = GridEvaluator::new(32, 16, mapper, PositionEstimator);

    let result = evaluator.evaluate(no_samples()).await.unwrap();
    assert_eq!(result.results_collected, 512);
    assert_eq!(result.matrix.get(31, 15), Some(31.0 * 1000.0 + 1.0));
}
