//! RGBA raster output and the price-matrix-to-image pass.

use heatmap_common::{Color, GeoSample, PriceMatrix};
use projection::CoordinateMapper;
use tracing::debug;

use crate::gradient::ColorScale;

/// Marker color used for sample positions.
pub const MARKER_COLOR: Color = Color::black();

/// `width x height` RGBA image, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image with every pixel zeroed (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Pixel color, or `None` outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.offset(x, y).map(|idx| {
            Color::new(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        })
    }

    /// Set a pixel; writes outside the image are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.offset(x, y) {
            self.pixels[idx] = color.r;
            self.pixels[idx + 1] = color.g;
            self.pixels[idx + 2] = color.b;
            self.pixels[idx + 3] = color.a;
        }
    }

    /// Iterate all pixel colors in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|px| Color::new(px[0], px[1], px[2], px[3]))
    }
}

/// Turns a completed price matrix into an image and marks the samples.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    scale: ColorScale,
    mapper: CoordinateMapper,
    marker_color: Color,
}

impl HeatmapRenderer {
    pub fn new(scale: ColorScale, mapper: CoordinateMapper) -> Self {
        Self {
            scale,
            mapper,
            marker_color: MARKER_COLOR,
        }
    }

    pub fn with_marker_color(mut self, color: Color) -> Self {
        self.marker_color = color;
        self
    }

    /// Render the density field, then draw every sample on top of it.
    pub fn render(&self, matrix: &PriceMatrix, samples: &[GeoSample]) -> RasterImage {
        let mut image = render_prices(matrix, &self.scale);
        let drawn = overlay_markers(&mut image, samples, &self.mapper, self.marker_color);
        debug!(
            samples = samples.len(),
            drawn,
            "Overlaid sample markers"
        );
        image
    }
}

/// Color every matrix cell. Row `y` of the matrix becomes image row `y`.
pub fn render_prices(matrix: &PriceMatrix, scale: &ColorScale) -> RasterImage {
    let width = matrix.width();
    let height = matrix.height();
    let mut image = RasterImage::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            let color = scale.price_to_color(matrix.get(x, y));
            image.put_pixel(x as u32, y as u32, color);
        }
    }

    image
}

/// Draw one pixel per sample. Later samples overwrite earlier ones on the
/// same pixel. Returns how many markers landed inside the image.
pub fn overlay_markers(
    image: &mut RasterImage,
    samples: &[GeoSample],
    mapper: &CoordinateMapper,
    color: Color,
) -> usize {
    let mut drawn = 0;
    for sample in samples {
        let (x, y) = mapper.geo_to_pixel(sample.longitude, sample.latitude);
        if mapper.in_raster(x, y) {
            image.put_pixel(x as u32, y as u32, color);
            drawn += 1;
        }
    }
    drawn
}
