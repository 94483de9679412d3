//! Price estimation and grid evaluation for price heatmaps.
//!
//! # Architecture
//!
//! ```text
//! HeatmapConfig + samples
//!      │
//!      ▼
//! Heatmap::build
//!      │
//!      ├─► GridEvaluator: worker pool runs DensityEstimator per pixel
//!      │         │
//!      │         └─► collector assembles the PriceMatrix
//!      │
//!      └─► HeatmapRenderer: bucket colors + sample markers
//!               │
//!               ▼
//!          RasterImage
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::Heatmap;
//!
//! let heatmap = Heatmap::new(config)?;
//! let image = heatmap.build(&samples).await?;
//! let legend = heatmap.bucket_list();
//! ```

pub mod density;
pub mod evaluator;
pub mod pipeline;

pub use density::{DensityEstimator, PriceEstimator};
pub use evaluator::{EvalPhase, GridEvaluation, GridEvaluator, ProgressObserver};
pub use pipeline::{bucket_list, build, Heatmap};
