//! # Dithering
//!
//! Converts a grayscale [`PixelGrid`] into a bilevel [`BitGrid`] the printer
//! can print.
//!
//! ## Threshold Contract
//!
//! Intensities use 0 = black and 255 = white. A pixel is printed (bit = 1)
//! when its intensity is **strictly below** [`THRESHOLD`] (128):
//!
//! ```text
//! 0 ────────────── 127 │ 128 ────────────── 255
//!        black (1)     │       white (0)
//! ```
//!
//! Swapping the comparison would invert every printed image.
//!
//! ## Algorithms
//!
//! | Mode | Speed | Quality | Artifacts |
//! |------|-------|---------|-----------|
//! | Threshold | Fastest | Poor on photos | Banding |
//! | Floyd-Steinberg | Slower | Better | Noise, worms |
//!
//! ## Floyd-Steinberg Error Diffusion
//!
//! Pixels are visited once each in row-major order. The quantization error of
//! each pixel (adjusted intensity minus 0 or 255) is pushed to the pixels not
//! yet visited:
//!
//! ```text
//!              ┌──────┬──────┐
//!              │  *   │ 7/16 │
//!       ┌──────┼──────┼──────┤
//!       │ 3/16 │ 5/16 │ 1/16 │
//!       └──────┴──────┴──────┘
//! ```
//!
//! Each share is rounded to the nearest integer rather than truncated, so
//! small errors near pure black or white still accumulate. Shares that would
//! land outside the grid are dropped.
//!
//! ## Usage Example
//!
//! ```
//! use tsprint::config::Dither;
//! use tsprint::render::{dither, grid::PixelGrid};
//!
//! let gray = PixelGrid::new(4, 1, vec![0, 100, 200, 255]).unwrap();
//! let bits = dither::dither(&gray, Dither::None);
//! assert_eq!(bits.dots(), &[1, 1, 0, 0]);
//! ```

use super::grid::{BitGrid, PixelGrid};
use crate::config::Dither;

/// Midpoint between black and white. Intensities below it print.
pub const THRESHOLD: u8 = 128;

/// Divisor of the Floyd-Steinberg weights.
const DIFFUSION_DIVISOR: i32 = 16;

/// Floyd-Steinberg neighbours as (dx, dy, weight).
const DIFFUSION: [(isize, usize, i32); 4] = [(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)];

/// Whether an (error-adjusted) intensity prints as a black dot.
#[inline]
pub fn is_black(intensity: i32) -> bool {
    intensity < THRESHOLD as i32
}

/// Convert a grayscale grid to a bilevel one using the given mode.
///
/// The output has the same dimensions as the input, and every value is 0 or
/// 1. The input grid is not modified.
pub fn dither(grid: &PixelGrid, mode: Dither) -> BitGrid {
    log::debug!(
        "dithering {}x{} grid with {:?}",
        grid.width(),
        grid.height(),
        mode
    );
    match mode {
        Dither::None => threshold(grid),
        Dither::FloydSteinberg => floyd_steinberg(grid),
    }
}

/// Threshold every pixel independently.
pub fn threshold(grid: &PixelGrid) -> BitGrid {
    let dots = grid
        .values()
        .iter()
        .map(|&v| u8::from(is_black(v as i32)))
        .collect();
    BitGrid::from_dots(grid.width(), grid.height(), dots)
}

/// Floyd-Steinberg error diffusion.
///
/// Works on an `i32` copy of the intensities so accumulated error can leave
/// the 0-255 range without wrapping.
pub fn floyd_steinberg(grid: &PixelGrid) -> BitGrid {
    let (width, height) = (grid.width(), grid.height());
    let mut buffer: Vec<i32> = grid.values().iter().map(|&v| v as i32).collect();
    let mut dots = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = buffer[idx];
            let black = is_black(value);
            dots[idx] = u8::from(black);

            let error = value - if black { 0 } else { 255 };
            if error != 0 {
                diffuse(&mut buffer, x, y, width, height, error);
            }
        }
    }

    BitGrid::from_dots(width, height, dots)
}

/// Push quantization error of (x, y) to its unvisited neighbours.
fn diffuse(buffer: &mut [i32], x: usize, y: usize, width: usize, height: usize, error: i32) {
    for (dx, dy, weight) in DIFFUSION {
        let Some(nx) = x.checked_add_signed(dx) else {
            continue;
        };
        let ny = y + dy;
        if nx >= width || ny >= height {
            continue;
        }
        let share = (error * weight + DIFFUSION_DIVISOR / 2).div_euclid(DIFFUSION_DIVISOR);
        buffer[ny * width + nx] += share;
    }
}

// ============================================================================
// TESTS
// ============================================================================
