//! # tsprint - Raster Printing for Star TSP100 Receipt Printers
//!
//! tsprint turns an image into the Star Graphic Mode raster commands
//! understood by Star Micronics TSP100 / TSP143 thermal receipt printers, and
//! sends them over the network. It provides:
//!
//! - **Rendering**: image decoding, thresholding and Floyd-Steinberg dithering,
//!   MSB-first packing into 576-dot raster lines
//! - **Encoding**: a deterministic command encoder for density, speed, margins
//!   and cutting
//! - **Transport**: raw TCP printing on port 9100
//!
//! ## Quick Start
//!
//! ```no_run
//! use tsprint::{
//!     config::PrintConfig,
//!     job,
//!     render::source,
//!     transport::NetworkTransport,
//! };
//!
//! let config = PrintConfig::default();
//! let image = source::load("receipt.png")?;
//! let grid = source::to_grid(&image, config.resize_width)?;
//!
//! // Encode the whole job before touching the network
//! let stream = job::build(&grid, &config)?;
//!
//! let mut transport = NetworkTransport::connect("192.168.1.50", 9100, std::time::Duration::from_secs(10))?;
//! transport.write_all(stream.as_bytes())?;
//!
//! # Ok::<(), tsprint::TsprintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Print job settings |
//! | [`render`] | Decoding, dithering and packing |
//! | [`encoder`] | Command stream state machine |
//! | [`protocol`] | Star Graphic Mode command builders |
//! | [`job`] | The full pipeline in one call |
//! | [`transport`] | Network backend |
//! | [`error`] | Error types |

pub mod config;
pub mod encoder;
pub mod error;
pub mod job;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use config::PrintConfig;
pub use encoder::CommandStream;
pub use error::TsprintError;
pub use transport::NetworkTransport;
