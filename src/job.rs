//! # Print Jobs
//!
//! Runs the core pipeline for one image:
//!
//! ```text
//! PixelGrid ──► dither ──► BitGrid ──► pack ──► PackedRaster ──► encode ──► CommandStream
//! ```
//!
//! Every stage finishes before the next begins, and the full stream exists
//! before anything is sent to a printer.
//!
//! ## Example
//!
//! ```
//! use tsprint::config::PrintConfig;
//! use tsprint::job;
//! use tsprint::render::grid::PixelGrid;
//!
//! let gray = PixelGrid::filled(8, 8, 0).unwrap();
//! let stream = job::build(&gray, &PrintConfig::default()).unwrap();
//! assert!(!stream.is_empty());
//! ```

use crate::config::PrintConfig;
use crate::encoder::{self, CommandStream};
use crate::error::TsprintError;
use crate::render::dither;
use crate::render::grid::{BitGrid, PixelGrid};
use crate::render::pack::{self, PackedRaster};

/// A dithered and packed image, ready to encode.
#[derive(Debug, Clone)]
pub struct Job {
    config: PrintConfig,
    bits: BitGrid,
    raster: PackedRaster,
}

impl Job {
    /// Validate the config, then dither and pack `grid`.
    pub fn prepare(grid: &PixelGrid, config: &PrintConfig) -> Result<Self, TsprintError> {
        config.validate()?;

        let bits = dither::dither(grid, config.dither);
        let raster = pack::pack(&bits, config.crop)?;

        if raster.height() != grid.height() {
            return Err(TsprintError::EncodingFailure(format!(
                "packed {} rows from a {}-row image",
                raster.height(),
                grid.height()
            )));
        }

        Ok(Self {
            config: config.clone(),
            bits,
            raster,
        })
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// The bilevel image before cropping.
    pub fn bits(&self) -> &BitGrid {
        &self.bits
    }

    /// The raster lines that will be printed.
    pub fn raster(&self) -> &PackedRaster {
        &self.raster
    }

    /// True if nothing would be printed.
    pub fn is_blank(&self) -> bool {
        self.raster.is_blank()
    }

    /// Encode the full command stream.
    pub fn encode(&self) -> Result<CommandStream, TsprintError> {
        encoder::encode(&self.raster, &self.config)
    }
}

/// Dither, pack and encode `grid` in one call.
pub fn build(grid: &PixelGrid, config: &PrintConfig) -> Result<CommandStream, TsprintError> {
    Job::prepare(grid, config)?.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CropPolicy, Dither};

    #[test]
    fn test_prepare_blank() {
        let job = Job::prepare(&PixelGrid::filled(16, 2, 255).unwrap(), &PrintConfig::default())
            .unwrap();
        assert!(job.is_blank());
        assert_eq!(job.raster().data(), &[0u8; 4]);
    }

    #[test]
    fn test_prepare_validates_config() {
        let config = PrintConfig {
            density: 9,
            ..Default::default()
        };
        let err = Job::prepare(&PixelGrid::filled(1, 1, 0).unwrap(), &config).unwrap_err();
        assert!(matches!(err, TsprintError::InvalidConfig(_)));
    }

    #[test]
    fn test_prepare_strict_crop() {
        let config = PrintConfig {
            crop: CropPolicy::Strict,
            ..Default::default()
        };
        let err = Job::prepare(&PixelGrid::filled(600, 1, 0).unwrap(), &config).unwrap_err();
        assert!(matches!(err, TsprintError::InvalidImageWidth { .. }));
    }

    #[test]
    fn test_bits_keep_full_width() {
        let job = Job::prepare(&PixelGrid::filled(600, 1, 0).unwrap(), &PrintConfig::default())
            .unwrap();
        assert_eq!(job.bits().width(), 600);
        assert_eq!(job.raster().width_bytes(), 72);
    }

    #[test]
    fn test_build_matches_job_encode() {
        let grid = PixelGrid::new(4, 1, vec![10, 120, 130, 250]).unwrap();
        let config = PrintConfig {
            dither: Dither::FloydSteinberg,
            ..Default::default()
        };
        let job = Job::prepare(&grid, &config).unwrap();
        assert_eq!(build(&grid, &config).unwrap(), job.encode().unwrap());
    }
}
