//! # Printer Setup and Cutter Commands
//!
//! Commands sent outside raster mode: print speed, print density and the
//! cutter. Raster-mode commands live in [`super::raster`].
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// RS (Record Separator) - Configuration command prefix
///
/// Used with ESC for printer configuration (`ESC RS r`, `ESC RS d`).
pub const RS: u8 = 0x1E;

/// NUL - Parameter terminator for raster-mode commands
pub const NUL: u8 = 0x00;

// ============================================================================
// PRINT QUALITY COMMANDS
// ============================================================================

/// # Set Print Speed (ESC RS r n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC RS r n |
/// | Hex     | 1B 1E 72 n |
/// | Decimal | 27 30 114 n |
///
/// ## Parameters
///
/// - `n`: 0 = fastest, 1 = medium, 2 = slowest (best quality)
///
/// The value is passed through unchanged; range checks happen before the
/// encoder runs.
///
/// ## Example
///
/// ```
/// use tsprint::protocol::commands;
///
/// assert_eq!(commands::speed(2), vec![0x1B, 0x1E, 0x72, 2]);
/// ```
#[inline]
pub fn speed(n: u8) -> Vec<u8> {
    vec![ESC, RS, b'r', n]
}

/// # Set Print Density (ESC RS d n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC RS d n |
/// | Hex     | 1B 1E 64 n |
/// | Decimal | 27 30 100 n |
///
/// ## Parameters
///
/// - `n`: 0 = highest density (darkest) ... 6 = lowest density, 3 = standard
#[inline]
pub fn density(n: u8) -> Vec<u8> {
    vec![ESC, RS, b'd', n]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed to Cut Position, Then Full Cut (ESC d 2)
///
/// Feeds the paper until the last printed line is past the blade, then cuts
/// completely through. Only valid outside raster mode, so it follows
/// [`super::raster::quit`].
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d 2  |
/// | Hex     | 1B 64 02 |
/// | Decimal | 27 100 2 |
///
/// ## Behavior
///
/// The feed distance is the printer's head-to-cutter gap, so nothing printed
/// is cut through regardless of the bottom margin.
#[inline]
pub fn cut_full_feed() -> Vec<u8> {
    vec![ESC, b'd', 2]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use tsprint::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(72), [0x48, 0x00]); // full-width raster line
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed() {
        assert_eq!(speed(0), vec![0x1B, 0x1E, 0x72, 0x00]);
        assert_eq!(speed(2), vec![0x1B, 0x1E, 0x72, 0x02]);
    }

    #[test]
    fn test_density() {
        assert_eq!(density(0), vec![0x1B, 0x1E, 0x64, 0x00]);
        assert_eq!(density(3), vec![0x1B, 0x1E, 0x64, 0x03]);
        assert_eq!(density(6), vec![0x1B, 0x1E, 0x64, 0x06]);
    }

    #[test]
    fn test_cut_full_feed() {
        assert_eq!(cut_full_feed(), vec![0x1B, 0x64, 0x02]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
