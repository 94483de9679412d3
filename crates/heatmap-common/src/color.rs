//! RGBA color value used for heatmap pixels and legend buckets.

use serde::{Deserialize, Serialize};

/// Color value in non-premultiplied RGBA format.
///
/// Serialized with single-letter upper-case keys, the shape the legend
/// tooling reads from the bucket file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "R")]
    pub r: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "B")]
    pub b: u8,
    #[serde(rename = "A")]
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fully transparent white, the color of pixels without an estimate.
    pub const fn transparent() -> Self {
        Self::new(255, 255, 255, 0)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}
