//! Common types shared across the price heatmap crates.

pub mod bounds;
pub mod color;
pub mod config;
pub mod error;
pub mod matrix;
pub mod sample;

pub use bounds::GeoBounds;
pub use color::Color;
pub use config::{EvaluatorConfig, HeatmapConfig, KernelConfig};
pub use error::{HeatmapError, HeatmapResult};
pub use matrix::PriceMatrix;
pub use sample::GeoSample;
