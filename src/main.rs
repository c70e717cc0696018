//! # tsprint CLI
//!
//! Sends raster images to Star Micronics TSP100 / TSP143 receipt printers.
//!
//! The program expects bilevel (black and white) images, at most 576 pixels
//! wide. Wider images are cropped; grayscale and colour images are
//! thresholded or dithered.
//!
//! ## Usage
//!
//! ```bash
//! # Print a logo with the defaults (density 3, slowest speed, cut)
//! tsprint 192.168.1.50 logo.png
//!
//! # Dither a photo, scale it to the full paper width, don't cut
//! tsprint --dither floydsteinberg --resize-width 576 --no-cut 192.168.1.50 photo.jpg
//!
//! # Check what would be printed without sending anything
//! tsprint --png preview.png 192.168.1.50 photo.jpg
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};

use tsprint::{
    TsprintError,
    config::{CropPolicy, Dither, PrintConfig},
    job::Job,
    render::{pack::PackedRaster, source},
    transport::{NetworkTransport, network::DEFAULT_PORT},
};

/// tsprint - Print raster images on Star TSP100 / TSP143 receipt printers
#[derive(Parser, Debug)]
#[command(name = "tsprint")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
struct Cli {
    /// Printer host name or IP address
    printer: String,

    /// Image file to print
    image_file: PathBuf,

    /// Cut the receipt after printing (default)
    #[arg(long, overrides_with = "no_cut")]
    cut: bool,

    /// Don't cut the receipt after printing
    #[arg(long, overrides_with = "cut")]
    no_cut: bool,

    /// 0 = highest density, 6 = lowest density
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=6))]
    density: u8,

    /// Grayscale to black/white conversion
    #[arg(long, value_enum, ignore_case = true, default_value = "NONE")]
    dither: DitherArg,

    /// Log verbosity
    #[arg(long, value_enum, ignore_case = true, default_value = "WARNING")]
    log_level: LogLevel,

    /// Blank paper before the image, in millimeters
    #[arg(long, default_value_t = 0)]
    margin_top: u16,

    /// Blank paper after the image, in millimeters
    #[arg(long, default_value_t = 9)]
    margin_bottom: u16,

    /// Resize the input image to the given width while preserving aspect ratio
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    resize_width: Option<u32>,

    /// 0 = fastest, 2 = slowest
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=2))]
    speed: u8,

    /// What to do with images wider than 576 pixels
    #[arg(long, value_enum, default_value = "truncate")]
    crop: CropArg,

    /// Printer port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Connect and write timeout in seconds
    #[arg(long, alias = "print-timeout", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Write the printer commands to a file instead of printing
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the image that would be printed as PNG instead of printing
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DitherArg {
    #[value(name = "NONE")]
    None,
    #[value(name = "FLOYDSTEINBERG", alias = "floyd-steinberg")]
    FloydSteinberg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    #[value(name = "CRITICAL")]
    Critical,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "INFO")]
    Info,
    #[value(name = "DEBUG")]
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CropArg {
    Truncate,
    TrimBlank,
    Strict,
}

impl From<DitherArg> for Dither {
    fn from(arg: DitherArg) -> Self {
        match arg {
            DitherArg::None => Dither::None,
            DitherArg::FloydSteinberg => Dither::FloydSteinberg,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

impl From<CropArg> for CropPolicy {
    fn from(arg: CropArg) -> Self {
        match arg {
            CropArg::Truncate => CropPolicy::Truncate,
            CropArg::TrimBlank => CropPolicy::TrimBlank,
            CropArg::Strict => CropPolicy::Strict,
        }
    }
}

impl Cli {
    fn print_config(&self) -> PrintConfig {
        PrintConfig {
            cut: !self.no_cut,
            density: self.density,
            dither: self.dither.into(),
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            resize_width: self.resize_width,
            speed: self.speed,
            crop: self.crop.into(),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TsprintError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .init();

    let config = cli.print_config();
    config.validate()?;

    let image = source::load(&cli.image_file)?;
    let grid = source::to_grid(&image, config.resize_width)?;
    let job = Job::prepare(&grid, &config)?;

    if let Some(png_path) = &cli.png {
        save_png(png_path, job.raster())?;
        println!("Saved to {}", png_path.display());
        return Ok(());
    }

    if job.is_blank() {
        log::error!("Image is blank, refusing to print");
        return Err(TsprintError::BlankImage);
    }

    // Encode everything up front so a failing job never sends partial data
    let stream = job.encode()?;

    if let Some(out_path) = &cli.output {
        std::fs::write(out_path, stream.as_bytes())?;
        println!("Wrote {} bytes to {}", stream.len(), out_path.display());
        return Ok(());
    }

    let mut transport = NetworkTransport::connect(
        &cli.printer,
        cli.port,
        Duration::from_secs(cli.timeout),
    )?;
    transport.write_all(stream.as_bytes())?;
    transport.close()?;

    log::info!("Sent {} bytes to {}", stream.len(), cli.printer);
    Ok(())
}

/// Save packed raster lines as a PNG image
fn save_png(path: &Path, raster: &PackedRaster) -> Result<(), TsprintError> {
    use image::{GrayImage, Luma};

    let width_bytes = raster.width_bytes();
    let width = width_bytes * 8;
    let height = raster.height();
    let data = raster.data();

    let mut img = GrayImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let byte_idx = y * width_bytes + x / 8;
            let bit_idx = 7 - (x % 8);
            let is_black = (data[byte_idx] >> bit_idx) & 1 == 1;

            let color = if is_black { 0u8 } else { 255u8 };
            img.put_pixel(x as u32, y as u32, Luma([color]));
        }
    }

    img.save(path)
        .map_err(|e| TsprintError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tsprint", "10.0.0.5", "logo.png"]).unwrap();
        assert_eq!(cli.printer, "10.0.0.5");
        assert_eq!(cli.port, 9100);
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.log_level, LogLevel::Warning);
        assert_eq!(cli.print_config(), PrintConfig::default());
    }

    #[test]
    fn test_no_cut() {
        let cli = Cli::try_parse_from(["tsprint", "--no-cut", "host", "a.png"]).unwrap();
        assert!(!cli.print_config().cut);

        // Last flag wins
        let cli = Cli::try_parse_from(["tsprint", "--no-cut", "--cut", "host", "a.png"]).unwrap();
        assert!(cli.print_config().cut);
    }

    #[test]
    fn test_repeated_flags() {
        let cli = Cli::try_parse_from(["tsprint", "--cut", "--cut", "host", "a.png"]).unwrap();
        assert!(cli.print_config().cut);

        let cli = Cli::try_parse_from(["tsprint", "--no-cut", "--no-cut", "host", "a.png"]).unwrap();
        assert!(!cli.print_config().cut);

        let cli = Cli::try_parse_from(["tsprint", "-d", "1", "-d", "5", "host", "a.png"]).unwrap();
        assert_eq!(cli.density, 5);
    }

    #[test]
    fn test_print_timeout_alias() {
        let cli =
            Cli::try_parse_from(["tsprint", "--print-timeout", "20", "host", "a.png"]).unwrap();
        assert_eq!(cli.timeout, 20);

        let cli = Cli::try_parse_from(["tsprint", "--timeout", "30", "host", "a.png"]).unwrap();
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_dither_case_insensitive() {
        for value in ["FLOYDSTEINBERG", "floydsteinberg", "FloydSteinberg"] {
            let cli =
                Cli::try_parse_from(["tsprint", "--dither", value, "host", "a.png"]).unwrap();
            assert_eq!(cli.print_config().dither, Dither::FloydSteinberg);
        }
    }

    #[test]
    fn test_ranges_enforced() {
        assert!(Cli::try_parse_from(["tsprint", "-d", "7", "host", "a.png"]).is_err());
        assert!(Cli::try_parse_from(["tsprint", "-s", "3", "host", "a.png"]).is_err());
        assert!(Cli::try_parse_from(["tsprint", "--resize-width", "0", "host", "a.png"]).is_err());
    }

    #[test]
    fn test_full_config() {
        let cli = Cli::try_parse_from([
            "tsprint",
            "-d",
            "0",
            "-s",
            "1",
            "--margin-top",
            "4",
            "--margin-bottom",
            "12",
            "--resize-width",
            "400",
            "--crop",
            "trim-blank",
            "--log-level",
            "debug",
            "host",
            "a.png",
        ])
        .unwrap();
        let config = cli.print_config();
        assert_eq!(config.density, 0);
        assert_eq!(config.speed, 1);
        assert_eq!(config.margin_top, 4);
        assert_eq!(config.margin_bottom, 12);
        assert_eq!(config.resize_width, Some(400));
        assert_eq!(config.crop, CropPolicy::TrimBlank);
        assert_eq!(log::LevelFilter::from(cli.log_level), log::LevelFilter::Debug);
    }
}
