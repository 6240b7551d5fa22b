//! Difference hash (dHash) over a decoded pixel buffer.
//!
//! dHash works by:
//! 1. Converting the pixel buffer to single-channel luminance
//! 2. Downsampling to a 9x8 grid with nearest-neighbor sampling
//! 3. Comparing each grid pixel to the one on its right: brighter = 1
//!
//! This captures the horizontal brightness gradient of the image. It is
//! robust to recompression and mild rescaling, but not to rotation,
//! mirroring, or cropping - that is the similarity envelope, not a defect.
//!
//! The downsample deliberately ignores the source aspect ratio: every image
//! maps onto the same 9x8 grid, which distorts geometry but keeps the
//! fingerprint stable and cheap.

use crate::core::codec::DecodedImage;

/// Number of bits in a dHash fingerprint
pub const DHASH_BITS: u32 = 64;

/// Grid width: one extra column so every row yields 8 comparisons
const GRID_W: usize = 9;
/// Grid height
const GRID_H: usize = 8;

/// Compute the 64-bit difference hash of a decoded image.
///
/// Bit `row * 8 + col` is set when the grid pixel at `col` is strictly
/// brighter than the grid pixel at `col + 1` in the same row.
pub fn dhash(img: &DecodedImage) -> u64 {
    let luma = to_luminance(img);
    let grid = sample_grid(&luma, img.width as usize, img.height as usize);

    let mut hash = 0u64;
    let mut bit_index = 0;

    for y in 0..GRID_H {
        for x in 0..(GRID_W - 1) {
            let current = grid[y * GRID_W + x];
            let next = grid[y * GRID_W + x + 1];

            if current > next {
                hash |= 1u64 << bit_index;
            }
            bit_index += 1;
        }
    }

    hash
}

/// Hamming distance between two fingerprints: the number of differing bits.
///
/// Always in `[0, 64]`, symmetric, and zero exactly when the fingerprints
/// are bit-identical.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Convert interleaved pixel data to a single-channel luminance plane.
///
/// For 3+ channels: `0.299R + 0.587G + 0.114B`, truncated to u8, alpha
/// ignored. For 1-2 channels the first channel is used directly.
fn to_luminance(img: &DecodedImage) -> Vec<u8> {
    let channels = img.channels as usize;
    let pixel_count = (img.width * img.height) as usize;
    let mut luma = vec![0u8; pixel_count];

    for (i, value) in luma.iter_mut().enumerate() {
        let base = i * channels;
        *value = if channels >= 3 {
            (0.299 * img.pixels[base] as f64
                + 0.587 * img.pixels[base + 1] as f64
                + 0.114 * img.pixels[base + 2] as f64) as u8
        } else {
            img.pixels[base]
        };
    }

    luma
}

/// Downsample a luminance plane to the 9x8 comparison grid.
///
/// Nearest-neighbor with integer source coordinates
/// (`src_x = x * width / 9`, `src_y = y * height / 8`), so the result is a
/// pure function of the input plane.
fn sample_grid(luma: &[u8], width: usize, height: usize) -> [u8; GRID_W * GRID_H] {
    let mut grid = [0u8; GRID_W * GRID_H];

    for y in 0..GRID_H {
        for x in 0..GRID_W {
            let src_x = x * width / GRID_W;
            let src_y = y * height / GRID_H;
            grid[y * GRID_W + x] = luma[src_y * width + src_x];
        }
    }

    grid
}
