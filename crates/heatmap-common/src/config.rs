//! Heatmap, kernel and evaluator parameters.
//!
//! All three are plain data with a `validate` step that runs before any
//! pixel is computed.

use serde::{Deserialize, Serialize};

use crate::bounds::GeoBounds;
use crate::error::{HeatmapError, HeatmapResult};

/// Upper bound on the number of price bands between the limits.
pub const MAX_PRICE_BANDS: usize = u16::MAX as usize;

/// Raster size, geographic extent and price bucketing of one heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Output width in pixels (longitude axis)
    pub width: u32,
    /// Output height in pixels (latitude axis)
    pub height: u32,
    /// Geographic area covered by the image
    pub bounds: GeoBounds,
    /// Lowest price with its own color band
    pub min_limit: f64,
    /// Highest price with its own color band
    pub max_limit: f64,
    /// Width of one color band
    pub step: f64,
}

impl HeatmapConfig {
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.width == 0 {
            return Err(HeatmapError::invalid("width", "must be positive"));
        }
        if self.height == 0 {
            return Err(HeatmapError::invalid("height", "must be positive"));
        }

        self.bounds.validate()?;

        let limits = [
            ("min_limit", self.min_limit),
            ("max_limit", self.max_limit),
            ("step", self.step),
        ];
        for (field, value) in limits {
            if !value.is_finite() {
                return Err(HeatmapError::invalid(field, format!("{} is not finite", value)));
            }
        }

        if self.step <= 0.0 {
            return Err(HeatmapError::invalid(
                "step",
                format!("must be positive, got {}", self.step),
            ));
        }
        if self.max_limit <= self.min_limit {
            return Err(HeatmapError::invalid(
                "max_limit",
                format!(
                    "must exceed min_limit ({} <= {})",
                    self.max_limit, self.min_limit
                ),
            ));
        }

        let bands = (self.max_limit - self.min_limit) / self.step;
        if !bands.is_finite() || bands > MAX_PRICE_BANDS as f64 {
            return Err(HeatmapError::invalid(
                "step",
                format!(
                    "gives {} price bands between the limits, at most {} allowed",
                    bands.ceil(),
                    MAX_PRICE_BANDS
                ),
            ));
        }
        Ok(())
    }
}

/// Gaussian kernel parameters for the price estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Distance in degrees beyond which samples contribute little; the
    /// kernel standard deviation is half of it.
    pub ignore_distance: f64,
    /// Kernel weight a sample must exceed to count as close.
    pub confidence_threshold: f64,
    /// Number of close samples required for a usable estimate.
    pub min_confident_samples: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            ignore_distance: 0.01,
            confidence_threshold: 2.0,
            min_confident_samples: 3,
        }
    }
}

impl KernelConfig {
    /// Kernel standard deviation (bandwidth).
    pub fn sigma(&self) -> f64 {
        self.ignore_distance / 2.0
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if !self.ignore_distance.is_finite() || self.ignore_distance <= 0.0 {
            return Err(HeatmapError::invalid(
                "ignore_distance",
                format!("must be positive, got {}", self.ignore_distance),
            ));
        }
        if !self.confidence_threshold.is_finite() {
            return Err(HeatmapError::invalid(
                "confidence_threshold",
                format!("{} is not finite", self.confidence_threshold),
            ));
        }
        if self.min_confident_samples == 0 {
            return Err(HeatmapError::invalid(
                "min_confident_samples",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Worker pool sizing for the grid evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Number of parallel estimator workers
    pub workers: usize,
    /// Pending tasks allowed in the dispatch queue before dispatch blocks
    pub queue_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            queue_depth: 1,
        }
    }
}

impl EvaluatorConfig {
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.workers == 0 {
            return Err(HeatmapError::invalid("workers", "must be at least 1"));
        }
        Ok(())
    }

    /// Channel capacity used for dispatch; bounded channels need room for
    /// at least one task.
    pub fn channel_capacity(&self) -> usize {
        self.queue_depth.max(1)
    }

    /// Capacity of the result channel: two pending results per worker, and
    /// never less than the dispatch queue.
    pub fn result_capacity(&self) -> usize {
        self.workers
            .saturating_mul(2)
            .max(self.channel_capacity())
    }
}
