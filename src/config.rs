//! # Print Job Configuration
//!
//! Settings that parametrize one print job. Defaults match the command-line
//! defaults, so `PrintConfig::default()` is what a bare invocation prints with.
//!
//! | Setting | Range | Default | Notes |
//! |---------|-------|---------|-------|
//! | `cut` | bool | `true` | Cut the paper after the image |
//! | `density` | 0-6 | 3 | 0 = darkest, 6 = lightest |
//! | `dither` | `None`, `FloydSteinberg` | `None` | Grayscale to bilevel conversion |
//! | `margin_top` | mm | 0 | Blank paper before the image |
//! | `margin_bottom` | mm | 9 | Blank paper after the image |
//! | `resize_width` | dots, > 0 | unset | Resize before dithering |
//! | `speed` | 0-2 | 2 | 0 = fastest, 2 = slowest |
//! | `crop` | see [`CropPolicy`] | `Truncate` | What to do with images wider than 576 dots |
//!
//! ## Usage
//!
//! ```
//! use tsprint::config::{Dither, PrintConfig};
//!
//! let config = PrintConfig {
//!     dither: Dither::FloydSteinberg,
//!     margin_bottom: 12,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::TsprintError;

/// Highest accepted print density (lightest output).
pub const MAX_DENSITY: u8 = 6;

/// Highest accepted print speed (slowest output).
pub const MAX_SPEED: u8 = 2;

/// Grayscale to bilevel conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dither {
    /// Plain threshold at the midpoint.
    #[default]
    None,
    /// Floyd-Steinberg error diffusion.
    FloydSteinberg,
}

/// Policy for images wider than the print head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropPolicy {
    /// Keep the leftmost 576 columns and discard the rest.
    #[default]
    Truncate,
    /// Discard only empty columns when the inked area fits, shifting the
    /// image left if needed. Falls back to `Truncate` otherwise.
    TrimBlank,
    /// Refuse wide images with [`TsprintError::InvalidImageWidth`].
    Strict,
}

/// # Print Job Configuration
///
/// Read-only through the pipeline. Ranged fields are validated at the edge
/// (CLI) and checked again by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintConfig {
    /// Cut the receipt after printing
    pub cut: bool,

    /// Print density, 0 (darkest) to 6 (lightest)
    pub density: u8,

    /// Dithering applied to grayscale input
    pub dither: Dither,

    /// Top margin in millimeters
    pub margin_top: u16,

    /// Bottom margin in millimeters
    pub margin_bottom: u16,

    /// Resize the source to this width (preserving aspect ratio)
    pub resize_width: Option<u32>,

    /// Print speed, 0 (fastest) to 2 (slowest)
    pub speed: u8,

    /// Width overflow policy
    pub crop: CropPolicy,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            cut: true,
            density: 3,
            dither: Dither::None,
            margin_top: 0,
            margin_bottom: 9,
            resize_width: None,
            speed: 2,
            crop: CropPolicy::Truncate,
        }
    }
}

impl PrintConfig {
    /// Check every ranged field.
    pub fn validate(&self) -> Result<(), TsprintError> {
        self.validate_levels()?;
        if self.resize_width == Some(0) {
            return Err(TsprintError::InvalidConfig(
                "resize width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the fields that end up in the command stream (density, speed).
    pub fn validate_levels(&self) -> Result<(), TsprintError> {
        check_level("density", self.density, MAX_DENSITY)?;
        check_level("speed", self.speed, MAX_SPEED)
    }
}

fn check_level(name: &str, value: u8, max: u8) -> Result<(), TsprintError> {
    if value > max {
        return Err(TsprintError::InvalidConfig(format!(
            "{} must be between 0 and {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrintConfig::default();
        assert!(config.cut);
        assert_eq!(config.density, 3);
        assert_eq!(config.dither, Dither::None);
        assert_eq!(config.margin_top, 0);
        assert_eq!(config.margin_bottom, 9);
        assert_eq!(config.resize_width, None);
        assert_eq!(config.speed, 2);
        assert_eq!(config.crop, CropPolicy::Truncate);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        for density in 0..=MAX_DENSITY {
            for speed in 0..=MAX_SPEED {
                let config = PrintConfig {
                    density,
                    speed,
                    ..Default::default()
                };
                assert!(config.validate().is_ok(), "density {density} speed {speed}");
            }
        }
    }

    #[test]
    fn test_level_messages() {
        let config = PrintConfig {
            density: 7,
            ..Default::default()
        };
        let err = config.validate_levels().unwrap_err();
        assert_eq!(err.to_string(), "Invalid config: density must be between 0 and 6, got 7");
        assert_eq!(config.validate().unwrap_err().to_string(), err.to_string());

        let config = PrintConfig {
            speed: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate_levels().unwrap_err().to_string(),
            "Invalid config: speed must be between 0 and 2, got 3"
        );
    }

    #[test]
    fn test_validate_rejects_density() {
        let config = PrintConfig {
            density: 7,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TsprintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_speed() {
        let config = PrintConfig {
            speed: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TsprintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_resize() {
        let config = PrintConfig {
            resize_width: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
