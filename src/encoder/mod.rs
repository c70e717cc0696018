//! # Command Encoder
//!
//! Wraps packed raster lines and a [`PrintConfig`] into the complete byte
//! stream for one print job.
//!
//! ## Stream Layout
//!
//! | Stage | Bytes |
//! |-------|-------|
//! | Setup | speed, density, raster init/enter, quality, EOT mode, margins, page length |
//! | TopMargin | `8 × margin_top` blank lines (`b 72 0` + 72 zero bytes) |
//! | Raster | one `b nL nH d…` command per image row |
//! | BottomMargin | `8 × margin_bottom` blank lines |
//! | ExitRaster | `ESC * r B` |
//! | Cut | `ESC d 2`, only when `cut` is set |
//!
//! The encoder is a small state machine over [`Stage`]: each [`Encoder::step`]
//! emits one stage (or one image row) into a byte buffer and advances. Output
//! depends only on the raster and the config, so the same job always encodes to
//! the same bytes.
//!
//! ## Example
//!
//! ```
//! use tsprint::config::PrintConfig;
//! use tsprint::encoder::Encoder;
//! use tsprint::render::pack::PackedRaster;
//!
//! let raster = PackedRaster::new(1, 1, vec![0x80]).unwrap();
//! let config = PrintConfig { margin_bottom: 0, cut: false, ..Default::default() };
//! let stream = Encoder::new(&raster, &config).unwrap().encode().unwrap();
//!
//! // Raster line for the single row, then quit raster mode
//! assert!(stream.as_bytes().ends_with(&[b'b', 1, 0, 0x80, 0x1B, b'*', b'r', b'B']));
//! ```

mod stage;

pub use stage::Stage;

use crate::config::PrintConfig;
use crate::error::TsprintError;
use crate::protocol::{commands, raster};
use crate::render::pack::PackedRaster;

/// The encoded bytes of one complete print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStream(Vec<u8>);

impl CommandStream {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CommandStream {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Number of blank raster lines for a margin in millimeters.
#[inline]
pub fn margin_lines(mm: u16) -> usize {
    mm as usize * raster::DOTS_PER_MM
}

/// Setup bytes for a job: quality settings and the raster session header.
pub fn setup(config: &PrintConfig) -> Vec<u8> {
    let mut out = Vec::with_capacity(48);
    out.extend(commands::speed(config.speed));
    out.extend(commands::density(config.density));
    out.extend(raster::init());
    out.extend(raster::enter());
    out.extend(raster::quality(raster::QUALITY_HIGH));
    out.extend(raster::eot_mode(raster::EOT_NO_CUT));
    out.extend(raster::left_margin(0));
    out.extend(raster::right_margin(0));
    out.extend(raster::page_length_continuous());
    out
}

/// Stateful encoder for one job.
pub struct Encoder<'a> {
    raster: &'a PackedRaster,
    config: &'a PrintConfig,
    stage: Stage,
    out: Vec<u8>,
}

impl<'a> Encoder<'a> {
    /// Prepare to encode `raster` with `config`.
    ///
    /// ## Errors
    ///
    /// - `InvalidConfig` if density or speed is out of range
    /// - `InvalidDimension` if a row is longer than a raster line can declare
    /// - `EncodingFailure` if the raster data does not match its shape
    pub fn new(raster: &'a PackedRaster, config: &'a PrintConfig) -> Result<Self, TsprintError> {
        config.validate_levels()?;
        row_length(raster.width_bytes())?;

        let expected = raster.width_bytes() * raster.height();
        if raster.data().len() != expected {
            return Err(TsprintError::EncodingFailure(format!(
                "raster holds {} bytes, {} rows of {} need {}",
                raster.data().len(),
                raster.height(),
                raster.width_bytes(),
                expected
            )));
        }

        let line_bytes = 3 + raster::BYTES_PER_LINE as usize;
        let margins = margin_lines(config.margin_top) + margin_lines(config.margin_bottom);
        let capacity = 64 + margins * line_bytes + raster.height() * (3 + raster.width_bytes());

        Ok(Self {
            raster,
            config,
            stage: Stage::Setup,
            out: Vec::with_capacity(capacity),
        })
    }

    /// The stage the next call to [`step`](Self::step) will emit.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Bytes emitted so far.
    pub fn output(&self) -> &[u8] {
        &self.out
    }

    /// Emit the current stage and advance. Returns the new stage.
    pub fn step(&mut self) -> Result<Stage, TsprintError> {
        match self.stage {
            Stage::Setup => {
                self.out.extend(setup(self.config));
            }
            Stage::TopMargin => {
                self.blank_lines(margin_lines(self.config.margin_top));
            }
            Stage::Raster { row } => {
                let width = self.raster.width_bytes();
                let data = self
                    .raster
                    .data()
                    .get(row * width..(row + 1) * width)
                    .ok_or_else(|| {
                        TsprintError::EncodingFailure(format!(
                            "row {} missing from {}-row raster",
                            row,
                            self.raster.height()
                        ))
                    })?;
                row_length(data.len())?;
                self.out.extend(raster::line(data));
            }
            Stage::BottomMargin => {
                self.blank_lines(margin_lines(self.config.margin_bottom));
            }
            Stage::ExitRaster => {
                self.out.extend(raster::quit());
            }
            Stage::Cut => {
                if self.config.cut {
                    self.out.extend(commands::cut_full_feed());
                }
            }
            Stage::Done => {}
        }

        self.stage = self.stage.next(self.raster.height());
        Ok(self.stage)
    }

    /// Run every remaining stage and return the finished stream.
    pub fn encode(mut self) -> Result<CommandStream, TsprintError> {
        while self.stage != Stage::Done {
            self.step()?;
        }
        log::debug!(
            "encoded {} rows into {} bytes (cut: {})",
            self.raster.height(),
            self.out.len(),
            self.config.cut
        );
        Ok(CommandStream(self.out))
    }

    fn blank_lines(&mut self, count: usize) {
        let line = raster::blank_line();
        for _ in 0..count {
            self.out.extend_from_slice(&line);
        }
    }
}

/// Encode a packed raster in one call.
pub fn encode(raster: &PackedRaster, config: &PrintConfig) -> Result<CommandStream, TsprintError> {
    Encoder::new(raster, config)?.encode()
}

/// Check that a row fits the 2-byte length field of a raster line.
fn row_length(len: usize) -> Result<u16, TsprintError> {
    u16::try_from(len).map_err(|_| {
        TsprintError::InvalidDimension(format!(
            "raster row of {} bytes exceeds the {}-byte limit",
            len,
            u16::MAX
        ))
    })
}

// ============================================================================
// TESTS
// ============================================================================
