//! # Encoder Stages
//!
//! The fixed order in which a print job is emitted.

/// One step of the command stream.
///
/// ```text
/// Setup → TopMargin → Raster(0) → … → Raster(h-1) → BottomMargin → ExitRaster → Cut → Done
/// ```
///
/// `Cut` emits nothing when cutting is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Speed, density and raster session setup.
    Setup,
    /// Blank lines before the image.
    TopMargin,
    /// Image row `row` is next.
    Raster { row: usize },
    /// Blank lines after the image.
    BottomMargin,
    /// Leave raster mode.
    ExitRaster,
    /// Cut the paper, if enabled.
    Cut,
    /// The stream is complete.
    Done,
}

impl Stage {
    /// The stage after this one, for an image of `height` rows.
    pub fn next(self, height: usize) -> Self {
        match self {
            Stage::Setup => Stage::TopMargin,
            Stage::TopMargin => Self::row_or_bottom(0, height),
            Stage::Raster { row } => Self::row_or_bottom(row + 1, height),
            Stage::BottomMargin => Stage::ExitRaster,
            Stage::ExitRaster => Stage::Cut,
            Stage::Cut | Stage::Done => Stage::Done,
        }
    }

    fn row_or_bottom(row: usize, height: usize) -> Self {
        if row < height {
            Stage::Raster { row }
        } else {
            Stage::BottomMargin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sequence() {
        let mut stage = Stage::Setup;
        let mut seen = vec![stage];
        while stage != Stage::Done {
            stage = stage.next(2);
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                Stage::Setup,
                Stage::TopMargin,
                Stage::Raster { row: 0 },
                Stage::Raster { row: 1 },
                Stage::BottomMargin,
                Stage::ExitRaster,
                Stage::Cut,
                Stage::Done,
            ]
        );
    }

    #[test]
    fn test_empty_image_skips_raster() {
        assert_eq!(Stage::TopMargin.next(0), Stage::BottomMargin);
    }

    #[test]
    fn test_done_is_terminal() {
        assert_eq!(Stage::Done.next(5), Stage::Done);
    }
}
