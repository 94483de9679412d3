//! Price bucketing and the hue gradient used to color heatmap pixels.
//!
//! Prices are first sorted into discrete bands of width `step` between
//! `min_limit` and `max_limit`, with one extra band on each side for
//! out-of-range values. The band index is then mapped linearly onto a hue
//! ramp from blue (cheap) to red (expensive).

use heatmap_common::{Color, HeatmapConfig};
use serde::{Deserialize, Serialize};

/// Hue span of the gradient, in degrees.
const HUE_RANGE: f64 = 290.0;

/// Hue offset; pushes the most expensive band past red into magenta.
const HUE_OFFSET: f64 = 40.0;

/// One legend entry: the lowest price of a band and the band's color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBucket {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Color")]
    pub color: Color,
}

/// Maps prices to bands and band indices to colors.
///
/// Derived once from a [`HeatmapConfig`] and immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    min_limit: f64,
    max_limit: f64,
    step: f64,
    bucket_count: usize,
}

impl ColorScale {
    pub fn new(config: &HeatmapConfig) -> Self {
        // Two extra buckets for values below and above the limits
        let total_range = config.max_limit - config.min_limit;
        let bucket_count = ((total_range / config.step).ceil() as usize).saturating_add(2);

        Self {
            min_limit: config.min_limit,
            max_limit: config.max_limit,
            step: config.step,
            bucket_count,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Zero-based band of a price. Band 0 holds everything below
    /// `min_limit`, the last band everything above `max_limit`.
    pub fn bucket_index(&self, price: f64) -> usize {
        if price > self.max_limit {
            self.bucket_count - 1
        } else if price < self.min_limit {
            0
        } else {
            ((price - self.min_limit) / self.step).floor() as usize + 1
        }
    }

    /// Opaque gradient color of a band.
    pub fn bucket_color(&self, bucket: usize) -> Color {
        let q = bucket as f64 / self.bucket_count as f64;
        let mut h = HUE_RANGE * (1.0 - q) - HUE_OFFSET;
        if h < 0.0 {
            h += 360.0;
        }
        let (r, g, b) = hsl_to_rgb(h / 360.0, 1.0, 0.5);
        Color::opaque(r, g, b)
    }

    /// Pixel color for an estimate; missing estimates are transparent.
    pub fn price_to_color(&self, price: Option<f64>) -> Color {
        match price {
            Some(price) => self.bucket_color(self.bucket_index(price)),
            None => Color::transparent(),
        }
    }

    /// Lowest price represented by a band. Band 0 is reported as 0.
    pub fn bucket_price(&self, bucket: usize) -> f64 {
        if bucket == 0 {
            0.0
        } else {
            self.min_limit + self.step * (bucket - 1) as f64
        }
    }

    /// Iterate the legend entries in ascending price order.
    ///
    /// Each call starts a fresh iteration.
    pub fn buckets(&self) -> Buckets<'_> {
        Buckets {
            scale: self,
            next: 0,
        }
    }
}

/// Iterator over the [`ColorBucket`]s of a [`ColorScale`].
#[derive(Debug, Clone)]
pub struct Buckets<'a> {
    scale: &'a ColorScale,
    next: usize,
}

impl Iterator for Buckets<'_> {
    type Item = ColorBucket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.scale.bucket_count {
            return None;
        }
        let bucket = self.next;
        self.next += 1;

        let price = self.scale.bucket_price(bucket);
        Some(ColorBucket {
            price,
            color: self.scale.price_to_color(Some(price)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.scale.bucket_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Buckets<'_> {}

/// Legend entries for a configuration, independent of any samples.
pub fn bucket_list(config: &HeatmapConfig) -> Vec<ColorBucket> {
    ColorScale::new(config).buckets().collect()
}

/// Convert an HSL color to 8-bit RGB.
///
/// All inputs are fractions in `[0, 1]`, including the hue. Channels are
/// truncated, not rounded, after scaling to 255.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Channel value for hue position `t` between chroma bounds `p` and `q`.
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::GeoBounds;

    fn config(min_limit: f64, max_limit: f64, step: f64) -> HeatmapConfig {
        HeatmapConfig {
            width: 10,
            height: 10,
            bounds: GeoBounds::new(0.0, 1.0, 0.0, 1.0),
            min_limit,
            max_limit,
            step,
        }
    }

    #[test]
    fn test_hue_to_rgb_segments() {
        assert_eq!(hue_to_rgb(0.0, 1.0, 0.0), 0.0);
        assert_eq!(hue_to_rgb(0.0, 1.0, 0.3), 1.0);
        assert_eq!(hue_to_rgb(0.0, 1.0, 0.9), 0.0);
        // wraps negative positions
        assert_eq!(hue_to_rgb(0.0, 1.0, -0.7), 1.0);
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        assert_eq!(hsl_to_rgb(0.4, 0.0, 0.5), (127, 127, 127));
    }

    #[test]
    fn test_bucket_count_rounds_partial_band_up() {
        let scale = ColorScale::new(&config(10000.0, 45000.0, 10000.0));
        assert_eq!(scale.bucket_count(), 6);
        assert_eq!(scale.bucket_index(45000.0), 4);
        assert_eq!(scale.bucket_index(45001.0), 5);
    }

    #[test]
    fn test_first_and_last_band_colors() {
        let scale = ColorScale::new(&config(10000.0, 50000.0, 10000.0));
        // band 0 sits at hue 250 (blue), band 5 at hue ~8 (red)
        assert_eq!(scale.bucket_color(0), Color::opaque(42, 0, 255));
        let red = scale.bucket_color(5);
        assert_eq!(red.r, 255);
        assert_eq!(red.b, 0);
    }

    #[test]
    fn test_missing_estimate_is_transparent_white() {
        let scale = ColorScale::new(&config(10000.0, 50000.0, 10000.0));
        assert_eq!(scale.price_to_color(None), Color::new(255, 255, 255, 0));
    }

    #[test]
    fn test_buckets_is_restartable() {
        let scale = ColorScale::new(&config(10000.0, 50000.0, 10000.0));
        let first: Vec<_> = scale.buckets().collect();
        let second: Vec<_> = scale.buckets().collect();
        assert_eq!(first, second);
        assert_eq!(scale.buckets().len(), 6);
    }
}
