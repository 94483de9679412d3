//! Geographic bounds of a heatmap raster.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Longitude/latitude rectangle covered by the output image.
///
/// The top-left pixel sits at `(lon_lo, lat_hi)` and the one-past-the-end
/// bottom-right corner at `(lon_hi, lat_lo)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lon_lo: f64,
    pub lon_hi: f64,
    pub lat_lo: f64,
    pub lat_hi: f64,
}

impl GeoBounds {
    pub fn new(lon_lo: f64, lon_hi: f64, lat_lo: f64, lat_hi: f64) -> Self {
        Self {
            lon_lo,
            lon_hi,
            lat_lo,
            lat_hi,
        }
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lon_hi - self.lon_lo
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.lat_hi - self.lat_lo
    }

    /// Check if a point lies inside the bounds (edges inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_lo && lon <= self.lon_hi && lat >= self.lat_lo && lat <= self.lat_hi
    }

    /// Reject non-finite, inverted or degenerate bounds.
    pub fn validate(&self) -> HeatmapResult<()> {
        let fields = [
            ("lon_lo", self.lon_lo),
            ("lon_hi", self.lon_hi),
            ("lat_lo", self.lat_lo),
            ("lat_hi", self.lat_hi),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(HeatmapError::invalid(field, format!("{} is not finite", value)));
            }
        }

        if self.lon_hi <= self.lon_lo {
            return Err(HeatmapError::invalid(
                "lon_hi",
                format!("must exceed lon_lo ({} <= {})", self.lon_hi, self.lon_lo),
            ));
        }
        if self.lat_hi <= self.lat_lo {
            return Err(HeatmapError::invalid(
                "lat_hi",
                format!("must exceed lat_lo ({} <= {})", self.lat_hi, self.lat_lo),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans() {
        let bounds = GeoBounds::new(17.0, 18.5, 59.0, 59.5);
        assert_eq!(bounds.lon_span(), 1.5);
        assert_eq!(bounds.lat_span(), 0.5);
    }

    #[test]
    fn test_contains_edges() {
        let bounds = GeoBounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(1.0, 1.0));
        assert!(!bounds.contains(1.01, 0.5));
    }

    #[test]
    fn test_validate_rejects_inverted() {
        let err = GeoBounds::new(1.0, 0.0, 0.0, 1.0).validate().unwrap_err();
        assert!(err.to_string().contains("lon_hi"));

        let err = GeoBounds::new(0.0, 1.0, 1.0, 1.0).validate().unwrap_err();
        assert!(err.to_string().contains("lat_hi"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let bounds = GeoBounds::new(f64::NAN, 1.0, 0.0, 1.0);
        assert!(bounds.validate().is_err());
    }
}
