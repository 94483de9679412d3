//! Image rendering for price heatmaps.
//!
//! - Price bucketing and the hue gradient (`gradient`)
//! - Price matrix to RGBA raster, with sample markers (`raster`)
//! - PNG encoding (`png`)

pub mod gradient;
pub mod png;
pub mod raster;

pub use gradient::{bucket_list, hsl_to_rgb, ColorBucket, ColorScale};
pub use raster::{HeatmapRenderer, RasterImage};
