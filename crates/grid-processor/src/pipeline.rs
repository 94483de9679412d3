//! End-to-end heatmap construction: evaluate, then render.

use std::sync::Arc;

use heatmap_common::{
    Color, EvaluatorConfig, GeoSample, HeatmapConfig, HeatmapResult, KernelConfig,
};
use projection::CoordinateMapper;
use renderer::gradient::{ColorBucket, ColorScale};
use renderer::raster::{HeatmapRenderer, RasterImage, MARKER_COLOR};
use tracing::{debug, info};

use crate::density::DensityEstimator;
use crate::evaluator::{GridEvaluator, ProgressObserver};

/// A validated heatmap configuration plus the state derived from it.
///
/// Building does not mutate the heatmap, so one instance can render any
/// number of sample sets.
pub struct Heatmap {
    config: HeatmapConfig,
    mapper: CoordinateMapper,
    scale: ColorScale,
    kernel: KernelConfig,
    evaluator: EvaluatorConfig,
    marker_color: Color,
    progress: Option<Arc<dyn ProgressObserver>>,
}

impl std::fmt::Debug for Heatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heatmap")
            .field("config", &self.config)
            .field("kernel", &self.kernel)
            .field("evaluator", &self.evaluator)
            .field("marker_color", &self.marker_color)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Heatmap {
    /// Validate the configuration and derive spans and bucket count.
    pub fn new(config: HeatmapConfig) -> HeatmapResult<Self> {
        config.validate()?;

        let scale = ColorScale::new(&config);
        debug!(
            width = config.width,
            height = config.height,
            lon_span = config.bounds.lon_span(),
            lat_span = config.bounds.lat_span(),
            buckets = scale.bucket_count(),
            "Heatmap configured"
        );

        Ok(Self {
            mapper: CoordinateMapper::from_config(&config),
            scale,
            config,
            kernel: KernelConfig::default(),
            evaluator: EvaluatorConfig::default(),
            marker_color: MARKER_COLOR,
            progress: None,
        })
    }

    pub fn with_kernel(mut self, kernel: KernelConfig) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorConfig) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_marker_color(mut self, color: Color) -> Self {
        self.marker_color = color;
        self
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Estimate every pixel, color the result and mark the samples.
    pub async fn build(&self, samples: &[GeoSample]) -> HeatmapResult<RasterImage> {
        self.kernel.validate()?;
        self.evaluator.validate()?;

        let samples: Arc<[GeoSample]> = Arc::from(samples);
        let estimator = DensityEstimator::new(self.kernel);

        let mut evaluator =
            GridEvaluator::new(self.config.width, self.config.height, self.mapper, estimator)
                .with_config(self.evaluator);
        if let Some(progress) = &self.progress {
            evaluator = evaluator.with_progress(Arc::clone(progress));
        }

        let evaluation = evaluator.evaluate(Arc::clone(&samples)).await?;

        let image = HeatmapRenderer::new(self.scale, self.mapper)
            .with_marker_color(self.marker_color)
            .render(&evaluation.matrix, &samples);

        info!(
            width = image.width(),
            height = image.height(),
            samples = samples.len(),
            "Heatmap rendered"
        );
        Ok(image)
    }

    /// Legend entries for this configuration.
    pub fn bucket_list(&self) -> Vec<ColorBucket> {
        self.scale.buckets().collect()
    }
}

/// Build a heatmap with default kernel and evaluator settings.
pub async fn build(config: HeatmapConfig, samples: &[GeoSample]) -> HeatmapResult<RasterImage> {
    Heatmap::new(config)?.build(samples).await
}

/// Legend entries for a configuration, after validating it.
pub fn bucket_list(config: &HeatmapConfig) -> HeatmapResult<Vec<ColorBucket>> {
    config.validate()?;
    Ok(renderer::gradient::bucket_list(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::GeoBounds;

    fn config() -> HeatmapConfig {
        HeatmapConfig {
            width: 8,
            height: 4,
            bounds: GeoBounds::new(0.0, 0.08, 0.0, 0.04),
            min_limit: 10000.0,
            max_limit: 50000.0,
            step: 10000.0,
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut bad = config();
        bad.step = 0.0;
        let err = Heatmap::new(bad).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_bucket_list_matches_scale() {
        let heatmap = Heatmap::new(config()).unwrap();
        let buckets = heatmap.bucket_list();
        assert_eq!(buckets.len(), heatmap.scale().bucket_count());
        assert_eq!(buckets, bucket_list(&config()).unwrap());
    }

    #[tokio::test]
    async fn test_build_rejects_zero_workers() {
        let heatmap = Heatmap::new(config())
            .unwrap()
            .with_evaluator(EvaluatorConfig {
                workers: 0,
                queue_depth: 1,
            });
        let err = heatmap.build(&[]).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
