//! Common heatmap configurations and input text used across tests.

use heatmap_common::{GeoBounds, HeatmapConfig};

/// Central Stockholm, the area the price tooling was first used for.
pub const STOCKHOLM: GeoBounds = GeoBounds {
    lon_lo: 17.846684,
    lon_hi: 18.266219,
    lat_lo: 59.205634,
    lat_hi: 59.439306,
};

/// 1000x1000 Stockholm heatmap with five 10 000-wide price bands.
pub fn stockholm_config() -> HeatmapConfig {
    HeatmapConfig {
        width: 1000,
        height: 1000,
        bounds: STOCKHOLM,
        min_limit: 10000.0,
        max_limit: 50000.0,
        step: 10000.0,
    }
}

/// Small raster over a 0.1 degree square, cheap enough to evaluate
/// every pixel in unit tests.
pub fn small_config(width: u32, height: u32) -> HeatmapConfig {
    HeatmapConfig {
        width,
        height,
        bounds: GeoBounds::new(0.0, 0.1, 0.0, 0.1),
        min_limit: 10000.0,
        max_limit: 50000.0,
        step: 10000.0,
    }
}

/// Sold-object export with a header, two usable rows and one row without
/// living area.
pub const SAMPLE_CSV: &str = "\
booliId,livingArea,soldPrice,lat,lon
1001,50,2500000,59.3300,18.0600
1002,0,1900000,59.3310,18.0610
1003,80,3200000,59.3320,18.0620
";

/// YAML configuration document in the format written by the data tooling.
pub const SAMPLE_CONFIG_YAML: &str = "\
name: stockholm
heatmap_width: 1000
heatmap_height: 1000
lat_lo: 59.205634
lng_lo: 17.846684
lat_hi: 59.439306
lng_hi: 18.266219
min_price_limit: 10000
max_price_limit: 50000
heatmap_step: 10000
";
