//! # Star Graphic Mode Protocol
//!
//! Low-level command builders for Star TSP100 / TSP143 receipt printers.
//! Every function returns the exact bytes of one command.
//!
//! ## Module Structure
//!
//! - [`commands`]: Speed, density and cutter commands
//! - [`raster`]: Raster session and raster line commands
//!
//! ## Usage Example
//!
//! ```
//! use tsprint::protocol::{commands, raster};
//!
//! let mut data = Vec::new();
//! data.extend(commands::speed(2));
//! data.extend(commands::density(3));
//! data.extend(raster::init());
//! data.extend(raster::enter());
//! data.extend(raster::line(&[0xF0; 72]));
//! data.extend(raster::quit());
//! data.extend(commands::cut_full_feed());
//! ```

pub mod commands;
pub mod raster;
