//! # Raster Packing
//!
//! Packs a bilevel [`BitGrid`] into printer raster lines.
//!
//! ## Bit Packing
//!
//! Each byte holds 8 horizontal dots:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! Rows whose width is not a multiple of 8 are padded with white (zero) bits
//! in the low end of the last byte.
//!
//! ## Width Limit
//!
//! The print head is [`MAX_WIDTH_DOTS`] (576) dots wide. Wider images are
//! reduced according to a [`CropPolicy`]; the default keeps the leftmost 576
//! columns and silently drops the rest.

use std::ops::Range;

use super::grid::BitGrid;
use crate::config::CropPolicy;
use crate::error::TsprintError;

/// Print-head width in dots.
pub const MAX_WIDTH_DOTS: usize = 576;

/// Packed raster lines, stored contiguously.
///
/// `data.len() == width_bytes * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRaster {
    width_bytes: usize,
    height: usize,
    data: Vec<u8>,
}

impl PackedRaster {
    /// Wrap already-packed raster data.
    ///
    /// ## Errors
    ///
    /// `EncodingFailure` if `data` is not exactly `width_bytes * height` bytes.
    pub fn new(width_bytes: usize, height: usize, data: Vec<u8>) -> Result<Self, TsprintError> {
        if width_bytes.checked_mul(height) != Some(data.len()) {
            return Err(TsprintError::EncodingFailure(format!(
                "raster of {} rows x {} bytes cannot hold {} bytes",
                height,
                width_bytes,
                data.len()
            )));
        }
        Ok(Self {
            width_bytes,
            height,
            data,
        })
    }

    /// Bytes per row.
    pub fn width_bytes(&self) -> usize {
        self.width_bytes
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterate the rows in print order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; a zero-width raster has only empty rows
        let size = self.width_bytes.max(1);
        let empty = self.width_bytes == 0;
        self.data
            .chunks_exact(size)
            .chain(std::iter::repeat_n(&[][..], if empty { self.height } else { 0 }))
    }

    /// True if no dot is set.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

/// Pack a bilevel grid into raster lines.
///
/// The output has one row per input row. Each row holds
/// `ceil(kept_width / 8)` bytes, where `kept_width` is at most 576.
///
/// ## Example
///
/// ```
/// use tsprint::config::CropPolicy;
/// use tsprint::render::{grid::BitGrid, pack};
///
/// let bits = BitGrid::new(10, 1, vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 1]).unwrap();
/// let raster = pack::pack(&bits, CropPolicy::Truncate).unwrap();
/// assert_eq!(raster.data(), &[0xAA, 0xC0]);
/// ```
pub fn pack(bits: &BitGrid, policy: CropPolicy) -> Result<PackedRaster, TsprintError> {
    let columns = crop_columns(bits, policy)?;
    let width_bytes = columns.len().div_ceil(8);
    let mut data = vec![0u8; width_bytes * bits.height()];

    if width_bytes > 0 {
        for (y, out) in data.chunks_exact_mut(width_bytes).enumerate() {
            pack_row_into(&bits.row(y)[columns.clone()], out);
        }
    }

    log::debug!(
        "packed {} rows of {} bytes (columns {}..{})",
        bits.height(),
        width_bytes,
        columns.start,
        columns.end
    );
    PackedRaster::new(width_bytes, bits.height(), data)
}

/// Pack a row of 0/1 dots into bytes.
///
/// ## Example
///
/// ```
/// use tsprint::render::pack::pack_row;
///
/// // 12 dots pack into 2 bytes (4 bits padding)
/// assert_eq!(pack_row(&[1; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(dots: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0u8; dots.len().div_ceil(8)];
    pack_row_into(dots, &mut bytes);
    bytes
}

/// Pack into a zeroed buffer of `ceil(dots.len() / 8)` bytes.
fn pack_row_into(dots: &[u8], out: &mut [u8]) {
    for (i, &dot) in dots.iter().enumerate() {
        if dot == 1 {
            out[i / 8] |= 0x80 >> (i % 8); // MSB first
        }
    }
}

/// Decide which columns of the grid are printed.
fn crop_columns(bits: &BitGrid, policy: CropPolicy) -> Result<Range<usize>, TsprintError> {
    let width = bits.width();
    if width <= MAX_WIDTH_DOTS {
        return Ok(0..width);
    }

    match policy {
        CropPolicy::Truncate => {
            log::info!(
                "Image is {} dots wide, keeping the first {}",
                width,
                MAX_WIDTH_DOTS
            );
            Ok(0..MAX_WIDTH_DOTS)
        }
        CropPolicy::Strict => Err(TsprintError::InvalidImageWidth {
            width,
            max: MAX_WIDTH_DOTS,
        }),
        CropPolicy::TrimBlank => {
            log::info!("Image is wider than {} dots, cropping will occur", MAX_WIDTH_DOTS);
            let Some(extent) = inked_columns(bits) else {
                return Ok(0..MAX_WIDTH_DOTS);
            };
            if extent.len() > MAX_WIDTH_DOTS {
                log::warn!("Cropping image content, data will be lost");
                Ok(0..MAX_WIDTH_DOTS)
            } else if extent.end > MAX_WIDTH_DOTS {
                log::warn!("Cropping empty image content only, image will be shifted to the left");
                Ok(extent)
            } else {
                log::info!("Cropping empty image content only, no data loss");
                Ok(0..extent.end)
            }
        }
    }
}

/// Horizontal extent of the black dots, or `None` for a blank grid.
fn inked_columns(bits: &BitGrid) -> Option<Range<usize>> {
    let column_inked = |x: usize| (0..bits.height()).any(|y| bits.is_black(x, y));
    let left = (0..bits.width()).find(|&x| column_inked(x))?;
    let right = (left..bits.width()).rev().find(|&x| column_inked(x))?;
    Some(left..right + 1)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> BitGrid {
        let mut dots = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                dots.push(u8::from(f(x, y)));
            }
        }
        BitGrid::new(width, height, dots).unwrap()
    }

    #[test]
    fn test_pack_row_8_dots() {
        assert_eq!(pack_row(&[1; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[0; 8]), vec![0x00]);
        assert_eq!(pack_row(&[1, 0, 1, 0, 1, 0, 1, 0]), vec![0xAA]);
        assert_eq!(pack_row(&[1, 1, 1, 1, 0, 0, 0, 0]), vec![0xF0]);
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[1]), vec![0x80]);
        assert_eq!(pack_row(&[1; 9]), vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_dimensions() {
        for (w, h) in [(1, 1), (7, 3), (8, 2), (9, 4), (575, 2), (576, 5), (577, 1), (1000, 3)] {
            let raster = pack(&bits(w, h, |_, _| false), CropPolicy::Truncate).unwrap();
            let expected = w.min(MAX_WIDTH_DOTS).div_ceil(8);
            assert_eq!(raster.height(), h);
            assert_eq!(raster.width_bytes(), expected, "width {w}");
            assert_eq!(raster.rows().count(), h);
            assert!(raster.rows().all(|r| r.len() == expected));
        }
    }

    #[test]
    fn test_all_black_partial_byte() {
        let raster = pack(&bits(12, 2, |_, _| true), CropPolicy::Truncate).unwrap();
        assert_eq!(raster.data(), &[0xFF, 0xF0, 0xFF, 0xF0]);
    }

    #[test]
    fn test_rows_in_order() {
        let raster = pack(&bits(8, 3, |x, y| x == y), CropPolicy::Truncate).unwrap();
        let rows: Vec<&[u8]> = raster.rows().collect();
        assert_eq!(rows, vec![&[0x80][..], &[0x40][..], &[0x20][..]]);
    }

    #[test]
    fn test_truncate_ignores_overflow_columns() {
        // Columns 576.. are black and must not show up anywhere
        let raster = pack(&bits(600, 10, |x, _| x >= 576), CropPolicy::Truncate).unwrap();
        assert_eq!(raster.width_bytes(), 72);
        assert!(raster.is_blank());
    }

    #[test]
    fn test_strict_rejects_wide() {
        let err = pack(&bits(600, 1, |_, _| false), CropPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            TsprintError::InvalidImageWidth { width: 600, max: 576 }
        ));
        assert!(pack(&bits(576, 1, |_, _| false), CropPolicy::Strict).is_ok());
    }

    #[test]
    fn test_trim_blank_no_data_loss() {
        // Ink within 0..100, blank beyond: keep 0..100
        let raster = pack(&bits(700, 2, |x, _| x == 99), CropPolicy::TrimBlank).unwrap();
        assert_eq!(raster.width_bytes(), 13); // ceil(100 / 8)
        assert_eq!(raster.data()[12], 0x10); // dot 99 = bit 3 of byte 12
    }

    #[test]
    fn test_trim_blank_shifts_left() {
        // Ink spans 100..=650 (551 wide) which fits once shifted
        let raster = pack(
            &bits(700, 1, |x, _| x == 100 || x == 650),
            CropPolicy::TrimBlank,
        )
        .unwrap();
        assert_eq!(raster.width_bytes(), 551_usize.div_ceil(8));
        assert_eq!(raster.data()[0], 0x80);
        // Column 650 lands at 550 = byte 68, bit 5
        assert_eq!(raster.data()[68], 0x02);
    }

    #[test]
    fn test_trim_blank_content_too_wide() {
        let raster = pack(&bits(700, 1, |x, _| x == 0 || x == 699), CropPolicy::TrimBlank).unwrap();
        assert_eq!(raster.width_bytes(), 72);
        assert_eq!(raster.data()[0], 0x80);
    }

    #[test]
    fn test_trim_blank_blank_image() {
        let raster = pack(&bits(700, 1, |_, _| false), CropPolicy::TrimBlank).unwrap();
        assert_eq!(raster.width_bytes(), 72);
    }

    #[test]
    fn test_packed_raster_new_validates_length() {
        assert!(PackedRaster::new(2, 3, vec![0; 6]).is_ok());
        let err = PackedRaster::new(2, 3, vec![0; 5]).unwrap_err();
        assert!(matches!(err, TsprintError::EncodingFailure(_)));
    }
}
