//! Affine mapping between longitude/latitude and raster pixels.
//!
//! ```text
//! (lon_lo, lat_hi) 0 -------------> x   (lon_hi, lat_hi)
//!                  |
//!                  |
//!                  v
//!                  y                    (lon_hi, lat_lo)
//! ```

use heatmap_common::{GeoBounds, HeatmapConfig};

/// Converts between geographic coordinates and pixel positions of a fixed
/// size raster.
///
/// The two directions are not exact inverses: `geo_to_pixel` truncates to
/// whole pixels, while `pixel_to_geo` returns the exact position of a
/// pixel's top-left corner. Both agree exactly at the raster corners.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    width: f64,
    height: f64,
    bounds: GeoBounds,
    lon_span: f64,
    lat_span: f64,
}

impl CoordinateMapper {
    pub fn new(width: u32, height: u32, bounds: GeoBounds) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            bounds,
            lon_span: bounds.lon_span(),
            lat_span: bounds.lat_span(),
        }
    }

    pub fn from_config(config: &HeatmapConfig) -> Self {
        Self::new(config.width, config.height, config.bounds)
    }

    /// Pixel column and row for a geographic point, truncated toward zero.
    ///
    /// Points outside the bounds give positions outside the raster; callers
    /// decide whether to clip them.
    pub fn geo_to_pixel(&self, lon: f64, lat: f64) -> (i32, i32) {
        let frac_lon = (lon - self.bounds.lon_lo) / self.lon_span;
        let frac_lat = (self.bounds.lat_hi - lat) / self.lat_span;

        let x = self.width * frac_lon;
        let y = self.height * frac_lat;

        (x as i32, y as i32)
    }

    /// Longitude and latitude of a pixel's top-left corner.
    ///
    /// Defined for `0..=width` and `0..=height`, so the one-past-the-end
    /// corner `(width, height)` maps to `(lon_hi, lat_lo)`.
    pub fn pixel_to_geo(&self, x: u32, y: u32) -> (f64, f64) {
        let frac_x = x as f64 / self.width;
        let frac_y = y as f64 / self.height;

        let lon = self.bounds.lon_lo + frac_x * self.lon_span;
        let lat = self.bounds.lat_hi - frac_y * self.lat_span;

        (lon, lat)
    }

    /// Whether a pixel position lies on the raster.
    pub fn in_raster(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as f64) < self.width && (y as f64) < self.height
    }
}
