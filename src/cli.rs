//! CLI argument parsing with clap.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Config;
use crate::error::StillError;
use crate::frame::{PixelFormat, RawVideoFrame, BGRA_BYTES_PER_PIXEL};
use crate::params::{Codec, Compression, EncoderSettings};

/// Save a raw BGRA video frame as a sequentially numbered PNG still.
#[derive(Parser, Debug)]
#[command(name = "framesnap", version, about)]
pub struct Cli {
    /// Raw frame file, or `-` to read from standard input.
    pub input: PathBuf,

    /// Frame width in pixels.
    #[arg(long)]
    pub width: u32,

    /// Frame height in pixels.
    #[arg(long)]
    pub height: u32,

    /// Bytes per row including padding (defaults to width * 4).
    #[arg(long)]
    pub row_bytes: Option<usize>,

    /// Pixel layout of the input buffer.
    #[arg(long, value_enum, default_value_t = PixelFormat::Bgra8)]
    pub pixel_format: PixelFormat,

    /// Directory for numbered stills.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Filename prefix before the sequence number.
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Explicit output path (skips sequential naming).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// PNG codec backend.
    #[arg(long, value_enum)]
    pub codec: Option<Codec>,

    /// Compression effort.
    #[arg(long, value_enum)]
    pub compression: Option<Compression>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a JSON summary of the written still to stdout.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Read the input frame described by the geometry flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub fn read_frame(&self) -> Result<RawVideoFrame, StillError> {
        let frame = if self.input == Path::new("-") {
            RawVideoFrame::read_bgra(io::stdin().lock(), self.width, self.height)?
        } else {
            let file = File::open(&self.input).map_err(|e| {
                StillError::InvalidArgument(format!(
                    "Cannot open input {}: {e}",
                    self.input.display()
                ))
            })?;
            RawVideoFrame::read_bgra(BufReader::new(file), self.width, self.height)?
        };

        let row_bytes = self.row_bytes.unwrap_or(self.width as usize * BGRA_BYTES_PER_PIXEL);
        Ok(frame.with_row_bytes(row_bytes).with_pixel_format(self.pixel_format))
    }

    /// Encoder settings with CLI flags layered over the config file.
    #[must_use]
    pub fn encoder_settings(&self, config: &Config) -> EncoderSettings {
        EncoderSettings {
            codec: self.codec.unwrap_or(config.encoder.codec),
            compression: self.compression.unwrap_or(config.encoder.compression),
        }
    }

    /// Output directory, preferring the flag over the config file.
    #[must_use]
    pub fn output_dir<'a>(&'a self, config: &'a Config) -> &'a Path {
        self.dir.as_deref().unwrap_or(&config.output.dir)
    }

    /// Filename prefix, preferring the flag over the config file.
    #[must_use]
    pub fn prefix<'a>(&'a self, config: &'a Config) -> &'a str {
        self.prefix.as_deref().unwrap_or(&config.output.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_geometry() {
        let cli = Cli::parse_from(["framesnap", "--width", "4", "--height", "2", "frame.raw"]);
        assert_eq!(cli.input, PathBuf::from("frame.raw"));
        assert_eq!((cli.width, cli.height), (4, 2));
        assert_eq!(cli.pixel_format, PixelFormat::Bgra8);
        assert!(cli.row_bytes.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn missing_geometry_fails() {
        assert!(Cli::try_parse_from(["framesnap", "frame.raw"]).is_err());
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "framesnap",
            "--width",
            "1920",
            "--height",
            "1080",
            "--row-bytes",
            "7744",
            "--pixel-format",
            "yuv10",
            "-d",
            "stills",
            "-p",
            "deck",
            "-o",
            "out.png",
            "--codec",
            "png",
            "--compression",
            "best",
            "--config",
            "alt.toml",
            "--json",
            "-v",
            "-",
        ]);
        assert_eq!(cli.row_bytes, Some(7744));
        assert_eq!(cli.pixel_format, PixelFormat::Yuv10);
        assert_eq!(cli.dir, Some(PathBuf::from("stills")));
        assert_eq!(cli.prefix.as_deref(), Some("deck"));
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(cli.codec, Some(Codec::Png));
        assert_eq!(cli.compression, Some(Compression::Best));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.input, PathBuf::from("-"));
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.encoder.codec = Codec::Png;
        config.output.prefix = "cfg".into();

        let cli = Cli::parse_from(["framesnap", "--width", "1", "--height", "1", "x"]);
        assert_eq!(cli.encoder_settings(&config).codec, Codec::Png);
        assert_eq!(cli.prefix(&config), "cfg");
        assert_eq!(cli.output_dir(&config), Path::new("."));

        let cli = Cli::parse_from([
            "framesnap", "--width", "1", "--height", "1", "--codec", "image", "-p", "flag", "x",
        ]);
        assert_eq!(cli.encoder_settings(&config).codec, Codec::Image);
        assert_eq!(cli.prefix(&config), "flag");
    }

    #[test]
    fn read_frame_applies_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.raw");
        std::fs::write(&path, [0u8; 24]).unwrap();

        let cli = Cli::parse_from([
            "framesnap",
            "--width",
            "2",
            "--height",
            "2",
            "--row-bytes",
            "12",
            path.to_str().unwrap(),
        ]);
        let frame = cli.read_frame().unwrap();
        assert_eq!(crate::frame::VideoFrame::row_bytes(&frame), 12);
    }

    #[test]
    fn read_frame_missing_file() {
        let cli = Cli::parse_from(["framesnap", "--width", "1", "--height", "1", "/nonexistent.raw"]);
        assert!(cli.read_frame().unwrap_err().to_string().contains("Cannot open input"));
    }
}
