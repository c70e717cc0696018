//! # Image Source
//!
//! Decodes image files and reduces them to a [`PixelGrid`] the pipeline can
//! work with. This is a thin layer over the `image` crate.
//!
//! Transparent pixels are flattened onto white paper, colour is converted to
//! luma, and an optional resize to a target width keeps the aspect ratio.

use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, imageops::FilterType};

use super::grid::PixelGrid;
use crate::error::TsprintError;

/// Decode an image file, guessing the format from its contents.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DynamicImage, TsprintError> {
    let path = path.as_ref();
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            TsprintError::Image(format!(
                "Could not open {} as an image: {}",
                path.display(),
                e
            ))
        })
}

/// Decode an image held in memory.
pub fn load_from_memory(data: &[u8]) -> Result<DynamicImage, TsprintError> {
    image::load_from_memory(data).map_err(|e| TsprintError::Image(e.to_string()))
}

/// Reduce a decoded image to a grayscale grid, resizing it first if
/// `resize_width` is set.
pub fn to_grid(image: &DynamicImage, resize_width: Option<u32>) -> Result<PixelGrid, TsprintError> {
    let mut gray = flatten(image);

    if let Some(width) = resize_width {
        gray = resize_to_width(&gray, width)?;
    }

    let grid = PixelGrid::new(
        gray.width() as usize,
        gray.height() as usize,
        gray.into_raw(),
    )?;

    if grid.has_gray_levels() {
        log::warn!("More than 2 levels (black/white), data will be lost via thresholding/dithering");
    }
    Ok(grid)
}

/// Convert to luma, compositing any alpha channel over white.
fn flatten(image: &DynamicImage) -> GrayImage {
    if !image.color().has_alpha() {
        return image.to_luma8();
    }

    let la = image.to_luma_alpha8();
    GrayImage::from_fn(la.width(), la.height(), |x, y| {
        let [l, a] = la.get_pixel(x, y).0;
        let (l, a) = (l as u32, a as u32);
        // l * a + 255 * (1 - a), in 0-255 fixed point
        Luma([((l * a + 255 * (255 - a) + 127) / 255) as u8])
    })
}

/// Resize to `width`, preserving aspect ratio.
pub fn resize_to_width(image: &GrayImage, width: u32) -> Result<GrayImage, TsprintError> {
    if width == 0 {
        return Err(TsprintError::InvalidConfig(
            "resize width must be positive".to_string(),
        ));
    }
    let (w, h) = image.dimensions();
    let height = (width as u64 * h as u64 / w.max(1) as u64).max(1) as u32;
    log::info!("Resizing image to width / height: {} / {}", width, height);
    Ok(image::imageops::resize(image, width, height, FilterType::Lanczos3))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgb, RgbImage};

    #[test]
    fn test_color_to_grid() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let grid = to_grid(&DynamicImage::ImageRgb8(img), None).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.values(), &[0, 255]);
    }

    #[test]
    fn test_transparent_becomes_white() {
        let mut img = image::GrayAlphaImage::new(2, 1);
        img.put_pixel(0, 0, LumaA([0, 0])); // fully transparent black
        img.put_pixel(1, 0, LumaA([0, 255])); // opaque black
        let grid = to_grid(&DynamicImage::ImageLumaA8(img), None).unwrap();
        assert_eq!(grid.values(), &[255, 0]);
    }

    #[test]
    fn test_resize_preserves_aspect() {
        let img = GrayImage::new(200, 100);
        let resized = resize_to_width(&img, 50).unwrap();
        assert_eq!(resized.dimensions(), (50, 25));
    }

    #[test]
    fn test_resize_min_height() {
        let img = GrayImage::new(1000, 1);
        let resized = resize_to_width(&img, 10).unwrap();
        assert_eq!(resized.dimensions(), (10, 1));
    }

    #[test]
    fn test_resize_zero_rejected() {
        let img = GrayImage::new(10, 10);
        assert!(resize_to_width(&img, 0).is_err());
    }

    #[test]
    fn test_to_grid_resizes() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(40, 20));
        let grid = to_grid(&img, Some(20)).unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 10));
    }

    #[test]
    fn test_load_from_memory_rejects_garbage() {
        let err = load_from_memory(b"not an image").unwrap_err();
        assert!(matches!(err, TsprintError::Image(_)));
    }
}
