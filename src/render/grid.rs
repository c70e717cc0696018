//! # Pixel Grids
//!
//! Dense, row-major pixel buffers passed between pipeline stages.
//!
//! - [`PixelGrid`]: grayscale intensities, 0 = black, 255 = white
//! - [`BitGrid`]: bilevel dots, 1 = black (ink), 0 = white
//!
//! Both are immutable once built. Each stage borrows its input and returns a
//! new grid.

use crate::error::TsprintError;

fn check_shape(width: usize, height: usize, len: usize) -> Result<(), TsprintError> {
    if width == 0 || height == 0 {
        return Err(TsprintError::InvalidDimension(format!(
            "grid must be non-empty, got {}x{}",
            width, height
        )));
    }
    if width.checked_mul(height) != Some(len) {
        return Err(TsprintError::InvalidDimension(format!(
            "{}x{} grid needs {} values, got {}",
            width,
            height,
            width.saturating_mul(height),
            len
        )));
    }
    Ok(())
}

/// A grayscale image, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    values: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a row-major intensity buffer.
    ///
    /// ## Errors
    ///
    /// `InvalidDimension` if either side is zero or `values.len()` is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, values: Vec<u8>) -> Result<Self, TsprintError> {
        check_shape(width, height, values.len())?;
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A grid where every pixel has the same intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, TsprintError> {
        Self::new(width, height, vec![value; width.saturating_mul(height)])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at (x, y). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.values[y * self.width + x]
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// One row of intensities.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    /// True when the image uses more than the two extreme levels.
    pub fn has_gray_levels(&self) -> bool {
        self.values.iter().any(|&v| v != 0 && v != 255)
    }
}

/// A bilevel image, one byte per dot holding 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: usize,
    height: usize,
    dots: Vec<u8>,
}

impl BitGrid {
    /// Wrap a row-major buffer of 0/1 dots.
    ///
    /// ## Errors
    ///
    /// `InvalidDimension` for a bad shape, `EncodingFailure` if any value is
    /// neither 0 nor 1.
    pub fn new(width: usize, height: usize, dots: Vec<u8>) -> Result<Self, TsprintError> {
        check_shape(width, height, dots.len())?;
        if let Some(pos) = dots.iter().position(|&d| d > 1) {
            return Err(TsprintError::EncodingFailure(format!(
                "bilevel grid holds {} at index {}",
                dots[pos], pos
            )));
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    /// Built by the ditherer, which only ever writes 0 or 1.
    pub(crate) fn from_dots(width: usize, height: usize, dots: Vec<u8>) -> Self {
        debug_assert_eq!(dots.len(), width * height);
        Self {
            width,
            height,
            dots,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the dot at (x, y) is black.
    #[inline]
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        self.dots[y * self.width + x] == 1
    }

    pub fn dots(&self) -> &[u8] {
        &self.dots
    }

    /// One row of dots.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.dots[y * self.width..(y + 1) * self.width]
    }

    /// Number of black dots.
    pub fn black_count(&self) -> usize {
        self.dots.iter().filter(|&&d| d == 1).count()
    }

    /// Render as a grayscale image (black = 0, white = 255) for previews.
    pub fn to_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let black = self.is_black(x as usize, y as usize);
            image::Luma([if black { 0 } else { 255 }])
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
