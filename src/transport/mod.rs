//! # Printer Transport Layer
//!
//! Communication backends for sending a finished command stream to a printer.
//!
//! ## Available Transports
//!
//! - [`network`]: TCP raw printing (port 9100)

pub mod network;

pub use network::NetworkTransport;
