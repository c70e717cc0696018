//! # Star Graphic Mode Raster Commands
//!
//! This module implements the raster commands understood by Star TSP100 /
//! TSP143 printers. These printers have no text mode: everything is printed
//! as raster lines while the printer is in raster mode.
//!
//! ## Raster Session
//!
//! | Step | Command | Hex |
//! |------|---------|-----|
//! | Initialize | ESC * r R | 1B 2A 72 52 |
//! | Enter raster mode | ESC * r A | 1B 2A 72 41 |
//! | Print quality | ESC * r Q n NUL | 1B 2A 72 51 n 00 |
//! | EOT behavior | ESC * r E n NUL | 1B 2A 72 45 n 00 |
//! | Left / right margin | ESC * r m l/r n NUL | 1B 2A 72 6D 6C/72 n 00 |
//! | Page length | ESC * r P n NUL | 1B 2A 72 50 n 00 |
//! | Raster line | b nL nH d1...dk | 62 nL nH ... |
//! | Quit raster mode | ESC * r B | 1B 2A 72 42 |
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 576 dots max)
//!   │
//!   │   ████████  ← Each dot is ~0.125mm (203 DPI)
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)

use super::commands::{ESC, NUL, u16_le};

/// Full print-head width in bytes (576 dots).
pub const BYTES_PER_LINE: u8 = 72;

/// Vertical resolution, 203 DPI.
pub const DOTS_PER_MM: usize = 8;

/// Raster print quality sent on every job (2 = high quality).
pub const QUALITY_HIGH: u8 = 2;

/// EOT mode that neither feeds nor cuts when raster mode ends.
pub const EOT_NO_CUT: u8 = 1;

/// Build an `ESC * r <tail>` sequence.
fn raster_cmd(tail: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(3 + tail.len());
    cmd.extend_from_slice(&[ESC, b'*', b'r']);
    cmd.extend_from_slice(tail);
    cmd
}

/// # Initialize Raster Mode (ESC * r R)
///
/// Resets raster settings and clears any stray data in the input buffer.
#[inline]
pub fn init() -> Vec<u8> {
    raster_cmd(b"R")
}

/// # Enter Raster Mode (ESC * r A)
#[inline]
pub fn enter() -> Vec<u8> {
    raster_cmd(b"A")
}

/// # Quit Raster Mode (ESC * r B)
///
/// Ends the raster session. The printer then runs the action selected with
/// [`eot_mode`].
#[inline]
pub fn quit() -> Vec<u8> {
    raster_cmd(b"B")
}

/// # Set Raster Print Quality (ESC * r Q n NUL)
#[inline]
pub fn quality(n: u8) -> Vec<u8> {
    raster_cmd(&[b'Q', n, NUL])
}

/// # Set EOT Behavior (ESC * r E n NUL)
///
/// Selects what happens on quit. `EOT_NO_CUT` leaves cutting to an explicit
/// cut command.
#[inline]
pub fn eot_mode(n: u8) -> Vec<u8> {
    raster_cmd(&[b'E', n, NUL])
}

/// # Set Left Margin (ESC * r m l n NUL)
#[inline]
pub fn left_margin(n: u8) -> Vec<u8> {
    raster_cmd(&[b'm', b'l', n, NUL])
}

/// # Set Right Margin (ESC * r m r n NUL)
#[inline]
pub fn right_margin(n: u8) -> Vec<u8> {
    raster_cmd(&[b'm', b'r', n, NUL])
}

/// # Set Continuous Page Length (ESC * r P '0' NUL)
///
/// The parameter is the ASCII digit `'0'`, which selects continuous paper
/// (no page boundary).
#[inline]
pub fn page_length_continuous() -> Vec<u8> {
    raster_cmd(&[b'P', b'0', NUL])
}

/// # Transfer Raster Line (b nL nH d1...dk)
///
/// Prints one raster line.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | b nL nH d1...dk |
/// | Hex     | 62 nL nH d1...dk |
///
/// ## Parameters
///
/// - `nL, nH`: number of data bytes, little-endian
/// - `d1...dk`: packed dots, k = nL + nH × 256
///
/// The caller guarantees `row.len() <= u16::MAX`; the encoder checks this
/// before building the command.
///
/// ## Example
///
/// ```
/// use tsprint::protocol::raster;
///
/// let cmd = raster::line(&[0x80]);
/// assert_eq!(cmd, vec![b'b', 1, 0, 0x80]);
/// ```
pub fn line(row: &[u8]) -> Vec<u8> {
    debug_assert!(row.len() <= u16::MAX as usize);

    let [nl, nh] = u16_le(row.len() as u16);
    let mut cmd = Vec::with_capacity(3 + row.len());
    cmd.push(b'b');
    cmd.push(nl);
    cmd.push(nh);
    cmd.extend_from_slice(row);
    cmd
}

/// A full-width blank raster line, used for margins.
pub fn blank_line() -> Vec<u8> {
    line(&[0u8; BYTES_PER_LINE as usize])
}

// ============================================================================
// TESTS
// ============================================================================
