//! Concurrent per-pixel evaluation of a price estimator.
//!
//! # Architecture
//!
//! ```text
//! dispatcher ──► task queue (bounded) ──► worker 0..N ──► results ──► collector
//!  (x, y) for                              pixel_to_geo      (x, y,      owns the
//!  every pixel                             + estimate        estimate)   PriceMatrix
//! ```
//!
//! Workers run on the blocking thread pool and share the samples read-only.
//! Only the collector writes the matrix. Evaluation is complete when the
//! collector has seen exactly `width * height` results; if the result
//! stream ends before that, the evaluation fails instead of returning a
//! partially filled matrix.

use std::sync::Arc;
use std::time::Instant;

use heatmap_common::{EvaluatorConfig, GeoSample, HeatmapError, HeatmapResult, PriceMatrix};
use projection::CoordinateMapper;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::density::PriceEstimator;

/// Receives coarse progress while the collector fills the matrix.
pub trait ProgressObserver: Send + Sync {
    /// Called each time the completed share crosses a new whole percent.
    fn on_progress(&self, percent: u8);
}

impl<F> ProgressObserver for F
where
    F: Fn(u8) + Send + Sync,
{
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

/// Lifecycle of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalPhase {
    Dispatching,
    Collecting,
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct PixelTask {
    x: u32,
    y: u32,
}

#[derive(Debug, Clone, Copy)]
struct PixelResult {
    x: u32,
    y: u32,
    price: Option<f64>,
}

/// Output of a finished evaluation.
#[derive(Debug, Clone)]
pub struct GridEvaluation {
    pub matrix: PriceMatrix,
    /// Number of pixel results the collector consumed
    pub results_collected: usize,
}

/// Evaluates an estimator over every pixel with a fixed worker pool.
pub struct GridEvaluator<E> {
    mapper: CoordinateMapper,
    width: u32,
    height: u32,
    estimator: Arc<E>,
    config: EvaluatorConfig,
    progress: Option<Arc<dyn ProgressObserver>>,
}

impl<E: PriceEstimator + 'static> GridEvaluator<E> {
    pub fn new(width: u32, height: u32, mapper: CoordinateMapper, estimator: E) -> Self {
        Self {
            mapper,
            width,
            height,
            estimator: Arc::new(estimator),
            config: EvaluatorConfig::default(),
            progress: None,
        }
    }

    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Total number of pixel tasks.
    pub fn task_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Run the estimator for every pixel and assemble the price matrix.
    pub async fn evaluate(&self, samples: Arc<[GeoSample]>) -> HeatmapResult<GridEvaluation> {
        self.config.validate()?;

        let total = self.task_count();
        let start = Instant::now();
        let mut phase = EvalPhase::Dispatching;
        debug!(
            ?phase,
            width = self.width,
            height = self.height,
            workers = self.config.workers,
            samples = samples.len(),
            "Starting grid evaluation"
        );

        let (task_tx, task_rx) = mpsc::channel::<PixelTask>(self.config.channel_capacity());
        let (result_tx, result_rx) = mpsc::channel::<PixelResult>(self.config.result_capacity());
        let task_rx = Arc::new(Mutex::new(task_rx));

        let mut workers = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            let task_rx = Arc::clone(&task_rx);
            let result_tx = result_tx.clone();
            let samples = Arc::clone(&samples);
            let estimator = Arc::clone(&self.estimator);
            let mapper = self.mapper;

            workers.push(tokio::task::spawn_blocking(move || {
                run_worker(id, &task_rx, &result_tx, &samples, &mapper, estimator.as_ref())
            }));
        }
        // Workers hold the only remaining senders; the result stream ends
        // once every worker has exited.
        drop(result_tx);
        drop(task_rx);

        let collector = tokio::spawn(collect(
            result_rx,
            self.width as usize,
            self.height as usize,
            self.progress.clone(),
        ));

        let mut dispatched = 0usize;
        'dispatch: for y in 0..self.height {
            for x in 0..self.width {
                if task_tx.send(PixelTask { x, y }).await.is_err() {
                    warn!(dispatched, total, "All grid workers stopped during dispatch");
                    break 'dispatch;
                }
                dispatched += 1;
            }
        }
        drop(task_tx);

        phase = EvalPhase::Collecting;
        debug!(?phase, dispatched, "All pixel tasks dispatched");

        let collected = collector
            .await
            .map_err(|e| HeatmapError::coordination(format!("collector task failed: {}", e)))?;

        let mut failed_workers = 0;
        for worker in workers {
            if let Err(e) = worker.await {
                failed_workers += 1;
                warn!(error = %e, "Grid worker terminated abnormally");
            }
        }

        let evaluation = collected?;
        if failed_workers > 0 {
            return Err(HeatmapError::coordination(format!(
                "{} grid worker(s) failed",
                failed_workers
            )));
        }

        phase = EvalPhase::Complete;
        info!(
            ?phase,
            pixels = evaluation.results_collected,
            valid = evaluation.matrix.valid_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Grid evaluation complete"
        );

        Ok(evaluation)
    }
}

/// Pull tasks until the queue is closed and drained.
fn run_worker<E: PriceEstimator + ?Sized>(
    id: usize,
    task_rx: &Mutex<mpsc::Receiver<PixelTask>>,
    result_tx: &mpsc::Sender<PixelResult>,
    samples: &[GeoSample],
    mapper: &CoordinateMapper,
    estimator: &E,
) {
    let mut processed = 0usize;
    loop {
        let task = task_rx.blocking_lock().blocking_recv();
        let Some(PixelTask { x, y }) = task else {
            break;
        };

        let (lon, lat) = mapper.pixel_to_geo(x, y);
        let price = estimator.estimate(lon, lat, samples);

        if result_tx.blocking_send(PixelResult { x, y, price }).is_err() {
            warn!(worker = id, "Result collector went away, stopping worker");
            break;
        }
        processed += 1;
    }
    debug!(worker = id, processed, "Grid worker finished");
}

/// Single writer of the price matrix.
async fn collect(
    mut result_rx: mpsc::Receiver<PixelResult>,
    width: usize,
    height: usize,
    progress: Option<Arc<dyn ProgressObserver>>,
) -> HeatmapResult<GridEvaluation> {
    let total = width * height;
    let mut matrix = PriceMatrix::new(width, height);
    let mut written = vec![false; total];
    let mut received = 0usize;
    let mut last_percent = 0u8;

    while received < total {
        let Some(PixelResult { x, y, price }) = result_rx.recv().await else {
            return Err(HeatmapError::coordination(format!(
                "result stream ended after {} of {} pixels",
                received, total
            )));
        };

        let (x, y) = (x as usize, y as usize);
        let idx = y * width + x;
        if x >= width || y >= height || written[idx] {
            return Err(HeatmapError::coordination(format!(
                "unexpected result for pixel ({}, {})",
                x, y
            )));
        }
        written[idx] = true;
        matrix.set(x, y, price);
        received += 1;

        let percent = (received * 100 / total) as u8;
        if percent != last_percent {
            last_percent = percent;
            if let Some(progress) = &progress {
                progress.on_progress(percent);
            }
        }
    }

    Ok(GridEvaluation {
        matrix,
        results_collected: received,
    })
}
