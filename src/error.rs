//! # Error Types
//!
//! This module defines the error type used throughout the tsprint library.
//!
//! Encoding errors are reported before anything is written to the printer,
//! so a failed job never leaves a half-sent stream behind.

use thiserror::Error;

/// Main error type for tsprint operations
#[derive(Debug, Error)]
pub enum TsprintError {
    /// Image is wider than the print head and the crop policy is strict
    #[error("Image is {width} dots wide, the printer supports at most {max}")]
    InvalidImageWidth { width: usize, max: usize },

    /// Density, speed or another ranged setting is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Grid or raster row dimensions that cannot be represented
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Internal invariant violation between pipeline stages
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    /// The image has no black pixel to print
    #[error("Image contains no printable data")]
    BlankImage,

    /// Image decoding or preview error
    #[error("Image error: {0}")]
    Image(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
