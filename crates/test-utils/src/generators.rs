//! Synthetic price sample generators.
//!
//! All generators are deterministic so tests can assert on exact pixel
//! positions and estimates.

use heatmap_common::{GeoBounds, GeoSample};

/// Creates `count` samples on a small ring around a center point.
///
/// With a `radius` well below the kernel bandwidth every sample carries a
/// high weight at the center, so the estimate there is trusted.
///
/// # Example
///
/// ```
/// use test_utils::cluster_samples;
///
/// let samples = cluster_samples(18.0, 59.3, 5, 0.0005, 42000.0);
/// assert_eq!(samples.len(), 5);
/// assert!(samples.iter().all(|s| s.price_per_unit_area == 42000.0));
/// ```
pub fn cluster_samples(
    center_lon: f64,
    center_lat: f64,
    count: usize,
    radius: f64,
    price: f64,
) -> Vec<GeoSample> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count.max(1) as f64 * std::f64::consts::TAU;
            GeoSample::new(
                center_lon + radius * angle.cos(),
                center_lat + radius * angle.sin(),
                price,
            )
        })
        .collect()
}

/// Creates a regular `cols` x `rows` lattice of samples covering `bounds`.
///
/// Prices come from `price_fn(col, row)`.
pub fn lattice_samples<F>(bounds: &GeoBounds, cols: usize, rows: usize, price_fn: F) -> Vec<GeoSample>
where
    F: Fn(usize, usize) -> f64,
{
    let mut samples = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let fx = (col as f64 + 0.5) / cols as f64;
            let fy = (row as f64 + 0.5) / rows as f64;
            samples.push(GeoSample::new(
                bounds.lon_lo + fx * bounds.lon_span(),
                bounds.lat_hi - fy * bounds.lat_span(),
                price_fn(col, row),
            ));
        }
    }
    samples
}
