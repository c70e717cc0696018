//! # Rendering Module
//!
//! Turns a decoded image into raster lines ready for the encoder.
//!
//! ## Modules
//!
//! - [`source`]: Image decoding, alpha flattening, resize to width
//! - [`grid`]: Dense grayscale and bilevel pixel grids
//! - [`dither`]: Thresholding and Floyd-Steinberg error diffusion
//! - [`pack`]: MSB-first packing into raster lines, 576-dot width policy
//!
//! ## Usage Example
//!
//! ```
//! use tsprint::config::{CropPolicy, Dither};
//! use tsprint::render::{dither, grid::PixelGrid, pack};
//!
//! let gray = PixelGrid::filled(16, 4, 0).unwrap();
//! let bits = dither::dither(&gray, Dither::FloydSteinberg);
//! let raster = pack::pack(&bits, CropPolicy::Truncate).unwrap();
//! assert_eq!(raster.data(), &[0xFF; 8]);
//! ```

pub mod dither;
pub mod grid;
pub mod pack;
pub mod source;
