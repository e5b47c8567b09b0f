//! Process-wide image writer that owns the codec backend.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::{ImagePngEncoder, StreamingPngEncoder};
use crate::error::StillError;
use crate::frame::{Bgra32View, RawVideoFrame, VideoFrame};
use crate::output::FilenameSequence;
use crate::params::{Codec, EncoderSettings};
use crate::ports::StillEncoder;

/// Summary of a still that reached the disk.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenStill {
    /// Output file.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Size of the PNG file.
    pub bytes_written: u64,
    /// Backend that produced the file.
    pub codec: &'static str,
    /// When the write completed.
    pub written_at: DateTime<Utc>,
}

/// Counts bytes on their way to the file.
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Owns the codec backend and the still filename counter.
pub struct ImageWriter {
    encoder: Option<Box<dyn StillEncoder>>,
    names: FilenameSequence,
}

impl ImageWriter {
    /// Create the codec backend selected by `settings` and check that it
    /// can produce a PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails its check encode.
    pub fn initialize(settings: EncoderSettings) -> Result<Self, StillError> {
        let encoder = build_encoder(settings);
        verify_encoder(encoder.as_ref()).inspect_err(|e| {
            log::error!("A PNG codec could not be created: {e}");
        })?;
        log::debug!(
            "Initialized {} PNG codec ({:?} compression)",
            settings.codec.name(),
            settings.compression
        );
        Ok(Self::with_encoder(encoder))
    }

    /// Wrap an already constructed backend.
    #[must_use]
    pub fn with_encoder(encoder: Box<dyn StillEncoder>) -> Self {
        Self { encoder: Some(encoder), names: FilenameSequence::new() }
    }

    /// Release the codec backend. Safe to call more than once.
    pub fn uninitialize(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            log::debug!("Released {} PNG codec", encoder.name());
        }
    }

    /// Next unused `{prefix}NNNN.png` path in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is invalid or no name is left.
    pub fn next_filename(&mut self, dir: &Path, prefix: &str) -> Result<PathBuf, StillError> {
        self.names.next_in(dir, prefix)
    }

    /// Encode a BGRA32 frame to a PNG file at `path`.
    ///
    /// The file is created or truncated. On failure any partially written
    /// file is left behind.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error: frame validation, opening
    /// the file, encoding, or flushing.
    pub fn write_bgra32_png(
        &self,
        frame: &dyn VideoFrame,
        path: &Path,
    ) -> Result<WrittenStill, StillError> {
        let encoder = self.encoder.as_deref().ok_or(StillError::NotInitialized)?;
        let view = Bgra32View::from_frame(frame)?;

        let file = File::create(path)?;
        let mut sink = CountingWriter { inner: BufWriter::new(file), count: 0 };
        encoder.encode(&view, &mut sink)?;
        sink.flush()?;

        log::debug!("Wrote {} bytes to {}", sink.count, path.display());
        Ok(WrittenStill {
            path: path.to_path_buf(),
            width: view.width(),
            height: view.height(),
            bytes_written: sink.count,
            codec: encoder.name(),
            written_at: Utc::now(),
        })
    }
}

fn build_encoder(settings: EncoderSettings) -> Box<dyn StillEncoder> {
    match settings.codec {
        Codec::Image => Box::new(ImagePngEncoder::new(settings.compression)),
        Codec::Png => Box::new(StreamingPngEncoder::new(settings.compression)),
    }
}

/// Encode a single transparent pixel and discard the output.
fn verify_encoder(encoder: &dyn StillEncoder) -> Result<(), StillError> {
    let frame = RawVideoFrame::bgra(1, 1, vec![0; 4]);
    let view = Bgra32View::from_frame(&frame)?;
    encoder.encode(&view, &mut io::sink())
}
