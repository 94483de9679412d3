//! Geolocated price samples.

use serde::{Deserialize, Serialize};

/// A single observed price, normalized per unit of living area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub longitude: f64,
    pub latitude: f64,
    pub price_per_unit_area: f64,
}

impl GeoSample {
    pub fn new(longitude: f64, latitude: f64, price_per_unit_area: f64) -> Self {
        Self {
            longitude,
            latitude,
            price_per_unit_area,
        }
    }

    /// Samples without a price do not take part in density estimation.
    #[inline]
    pub fn has_price(&self) -> bool {
        self.price_per_unit_area != 0.0
    }
}
