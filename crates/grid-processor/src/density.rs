//! Gaussian kernel price estimation.
//!
//! The estimate at a point is the kernel-weighted mean of every priced
//! sample. It is only trusted when enough samples lie close to the point;
//! otherwise the estimator reports no price.

use std::f64::consts::PI;

use heatmap_common::{GeoSample, KernelConfig};

/// Computes a price estimate for one geographic point.
///
/// Implementations are shared between grid workers, so they must be
/// thread safe and must not mutate the samples.
pub trait PriceEstimator: Send + Sync {
    /// Estimated price at `(lon, lat)`, or `None` if the samples are too
    /// sparse there.
    fn estimate(&self, lon: f64, lat: f64, samples: &[GeoSample]) -> Option<f64>;
}

/// Isotropic Gaussian kernel density estimator with a confidence gate.
#[derive(Debug, Clone, Copy)]
pub struct DensityEstimator {
    kernel: KernelConfig,
    two_sigma_sqr: f64,
    norm: f64,
}

impl DensityEstimator {
    pub fn new(kernel: KernelConfig) -> Self {
        let sigma = kernel.sigma();
        let two_sigma_sqr = 2.0 * sigma * sigma;
        Self {
            kernel,
            two_sigma_sqr,
            norm: 1.0 / (two_sigma_sqr * PI),
        }
    }

    /// Kernel weight for a squared distance in degrees².
    #[inline]
    pub fn weight(&self, distance_sqr: f64) -> f64 {
        self.norm * (-distance_sqr / self.two_sigma_sqr).exp()
    }
}

impl Default for DensityEstimator {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

impl PriceEstimator for DensityEstimator {
    fn estimate(&self, lon: f64, lat: f64, samples: &[GeoSample]) -> Option<f64> {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut confident = 0usize;

        for sample in samples.iter().filter(|s| s.has_price()) {
            let d_lon = lon - sample.longitude;
            let d_lat = lat - sample.latitude;
            let weight = self.weight(d_lon * d_lon + d_lat * d_lat);

            if weight > self.kernel.confidence_threshold {
                confident += 1;
            }

            numerator += sample.price_per_unit_area * weight;
            denominator += weight;
        }

        // Weights of distant samples underflow to zero, so a negative
        // threshold can count samples that add nothing to the denominator.
        if confident < self.kernel.min_confident_samples || denominator <= 0.0 {
            return None;
        }

        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_peak_and_decay() {
        let estimator = DensityEstimator::default();
        // 1 / (2 * pi * 0.005^2)
        let peak = estimator.weight(0.0);
        assert!((peak - 6366.197723675814).abs() < 1e-6);
        assert!(estimator.weight(0.0001) < peak);
        assert!(estimator.weight(1.0) < 1e-100);
    }

    #[test]
    fn test_confidence_radius() {
        let estimator = DensityEstimator::default();
        // Weight drops below the default threshold of 2 at roughly 0.02 degrees
        assert!(estimator.weight(0.019 * 0.019) > 2.0);
        assert!(estimator.weight(0.021 * 0.021) < 2.0);
    }
}
