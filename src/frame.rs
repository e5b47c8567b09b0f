//! Video frame model and BGRA validation.

use std::fmt;
use std::io::Read;

use crate::error::StillError;

/// Bytes per pixel in a BGRA32 frame.
pub const BGRA_BYTES_PER_PIXEL: usize = 4;

/// Pixel layouts a capture device can hand over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PixelFormat {
    /// 8-bit 4:2:2 YUV ("2vuy").
    Yuv8,
    /// 10-bit 4:2:2 YUV ("v210").
    Yuv10,
    /// 8-bit ARGB.
    Argb8,
    /// 8-bit BGRA, the only layout that can be written.
    #[default]
    Bgra8,
    /// 10-bit RGB ("r210").
    Rgb10,
    /// 12-bit RGB ("R12B").
    Rgb12,
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yuv8 => "8-bit YUV",
            Self::Yuv10 => "10-bit YUV",
            Self::Argb8 => "8-bit ARGB",
            Self::Bgra8 => "8-bit BGRA",
            Self::Rgb10 => "10-bit RGB",
            Self::Rgb12 => "12-bit RGB",
        };
        f.write_str(name)
    }
}

/// A single captured video frame.
pub trait VideoFrame {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Distance in bytes between the starts of consecutive rows.
    fn row_bytes(&self) -> usize;
    /// Layout of the pixels in [`VideoFrame::bytes`].
    fn pixel_format(&self) -> PixelFormat;
    /// The pixel buffer, or `None` if the frame has no accessible buffer.
    fn bytes(&self) -> Option<&[u8]>;
}

/// An owned frame backed by a byte vector.
#[derive(Debug, Clone)]
pub struct RawVideoFrame {
    width: u32,
    height: u32,
    row_bytes: usize,
    pixel_format: PixelFormat,
    data: Vec<u8>,
}

impl RawVideoFrame {
    /// Create a tightly packed BGRA frame (`row_bytes == width * 4`).
    #[must_use]
    pub fn bgra(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            row_bytes: width as usize * BGRA_BYTES_PER_PIXEL,
            pixel_format: PixelFormat::Bgra8,
            data,
        }
    }

    /// Override the row stride for padded buffers.
    #[must_use]
    pub fn with_row_bytes(mut self, row_bytes: usize) -> Self {
        self.row_bytes = row_bytes;
        self
    }

    /// Override the declared pixel layout.
    #[must_use]
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = pixel_format;
        self
    }

    /// Read the whole frame buffer from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails.
    pub fn read_bgra<R: Read>(mut reader: R, width: u32, height: u32) -> Result<Self, StillError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::bgra(width, height, data))
    }
}

impl VideoFrame for RawVideoFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn bytes(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

/// A validated, borrowed BGRA32 frame ready for encoding.
#[derive(Debug, Clone, Copy)]
pub struct Bgra32View<'a> {
    width: u32,
    height: u32,
    row_bytes: usize,
    bytes: &'a [u8],
}

impl<'a> Bgra32View<'a> {
    /// Check that `frame` is a well-formed BGRA32 frame and borrow its pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel format is not BGRA, the buffer is
    /// missing, or the geometry does not fit the buffer.
    pub fn from_frame(frame: &'a dyn VideoFrame) -> Result<Self, StillError> {
        let pixel_format = frame.pixel_format();
        if pixel_format != PixelFormat::Bgra8 {
            log::error!("Video frame is not in 8-bit BGRA pixel format ({pixel_format})");
            return Err(StillError::UnsupportedPixelFormat(pixel_format));
        }

        let Some(bytes) = frame.bytes() else {
            log::error!("Could not get video frame buffer");
            return Err(StillError::MissingFrameBuffer);
        };

        let (width, height, row_bytes) = (frame.width(), frame.height(), frame.row_bytes());
        if width == 0 || height == 0 {
            return Err(StillError::InvalidFrame(format!("empty frame {width}x{height}")));
        }

        let packed = width as usize * BGRA_BYTES_PER_PIXEL;
        if row_bytes < packed {
            return Err(StillError::InvalidFrame(format!(
                "row bytes {row_bytes} smaller than {packed} for width {width}"
            )));
        }

        let needed = row_bytes
            .checked_mul(height as usize)
            .ok_or_else(|| StillError::InvalidFrame("frame size overflows".to_string()))?;
        if bytes.len() < needed {
            return Err(StillError::InvalidFrame(format!(
                "buffer holds {} bytes, {height} rows of {row_bytes} need {needed}",
                bytes.len()
            )));
        }
        if bytes.len() > needed {
            log::warn!("Ignoring {} trailing bytes after frame data", bytes.len() - needed);
        }

        Ok(Self { width, height, row_bytes, bytes: &bytes[..needed] })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of one unpadded row.
    #[must_use]
    pub fn packed_row_len(&self) -> usize {
        self.width as usize * BGRA_BYTES_PER_PIXEL
    }

    /// Iterate over rows with any stride padding removed.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let packed = self.packed_row_len();
        let bytes: &'a [u8] = self.bytes;
        bytes.chunks_exact(self.row_bytes).map(move |row| &row[..packed])
    }
}

/// Copy a BGRA row into `dst` as RGBA.
///
/// Both slices must have the same length.
pub fn bgra_to_rgba(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src
        .chunks_exact(BGRA_BYTES_PER_PIXEL)
        .zip(dst.chunks_exact_mut(BGRA_BYTES_PER_PIXEL))
    {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = s[3];
    }
}
