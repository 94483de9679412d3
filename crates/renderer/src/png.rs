//! PNG encoding for heatmap rasters.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the image has ≤256 unique
//!   colors, which holds for any heatmap with a sane number of buckets.
//! - **RGBA PNG (color type 6)**: fallback for images with more colors.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use thiserror::Error;

use crate::raster::RasterImage;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

type Palette = Vec<(u8, u8, u8, u8)>;

#[derive(Debug, Error)]
pub enum PngError {
    #[error("image data is {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("IDAT compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

/// Encode a raster, picking indexed or RGBA PNG automatically.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, PngError> {
    let pixels = image.pixels();
    let num_pixels = pixels.len() / 4;

    let palette_result = if num_pixels >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(image.width(), image.height(), &palette, &indices),
        None => create_png_rgba(pixels, image.width(), image.height()),
    }
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    (
        packed as u8,
        (packed >> 8) as u8,
        (packed >> 16) as u8,
        (packed >> 24) as u8,
    )
}

/// Sequential palette extraction for small images.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger images.
///
/// Unique colors are gathered per chunk, merged into one palette, and then
/// every pixel is mapped to its palette index in a second parallel pass.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let chunk_pixels = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let unique_colors: Vec<u32> = pixels
        .par_chunks(chunk_pixels * 4)
        .flat_map(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for px in chunk.chunks_exact(4) {
                local.insert(pack_color(px[0], px[1], px[2], px[3]), ());
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut global: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for packed in unique_colors {
        if !global.contains_key(&packed) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            global.insert(packed, palette.len() as u8);
            palette.push(unpack_color(packed));
        }
    }

    let mut indices = vec![0u8; pixels.len() / 4];
    indices
        .par_chunks_mut(chunk_pixels)
        .zip(pixels.par_chunks(chunk_pixels * 4))
        .for_each(|(idx_chunk, px_chunk)| {
            for (idx, px) in idx_chunk.iter_mut().zip(px_chunk.chunks_exact(4)) {
                let packed = pack_color(px[0], px[1], px[2], px[3]);
                *idx = global.get(&packed).copied().unwrap_or(0);
            }
        });

    Some((palette, indices))
}

fn write_ihdr(png: &mut Vec<u8>, width: u32, height: u32, color_type: u8) {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(png, b"IHDR", &ihdr);
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: u32,
    height: u32,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> Result<Vec<u8>, PngError> {
    let expected = width as usize * height as usize;
    if indices.len() != expected {
        return Err(PngError::SizeMismatch {
            width,
            height,
            expected,
            actual: indices.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_ihdr(&mut png, width, height, 3);

    let plte: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS carries one alpha per palette entry, only needed with transparency
    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an RGBA PNG (color type 6).
pub fn create_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PngError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(PngError::SizeMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_ihdr(&mut png, width, height, 6);

    let idat = deflate_scanlines(pixels, width as usize * 4, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Prefix every row with filter type 0 and zlib-compress the result.
fn deflate_scanlines(data: &[u8], row_bytes: usize, rows: usize) -> std::io::Result<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(rows * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes).take(rows) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
