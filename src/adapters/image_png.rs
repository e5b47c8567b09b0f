//! PNG backend built on the `image` crate.

use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use crate::error::StillError;
use crate::frame::{bgra_to_rgba, Bgra32View};
use crate::params::Compression;
use crate::ports::StillEncoder;

/// Swizzles the frame into one RGBA buffer and hands it to `image`.
pub struct ImagePngEncoder {
    compression: Compression,
}

impl ImagePngEncoder {
    /// Create an encoder with the given compression effort.
    #[must_use]
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }
}

fn compression_type(compression: Compression) -> CompressionType {
    match compression {
        Compression::Fast => CompressionType::Fast,
        Compression::Default => CompressionType::Default,
        Compression::Best => CompressionType::Best,
    }
}

impl StillEncoder for ImagePngEncoder {
    fn name(&self) -> &'static str {
        "image"
    }

    fn encode(&self, view: &Bgra32View<'_>, sink: &mut dyn Write) -> Result<(), StillError> {
        let packed = view.packed_row_len();
        let mut rgba = vec![0u8; packed * view.height() as usize];
        for (src, dst) in view.rows().zip(rgba.chunks_exact_mut(packed)) {
            bgra_to_rgba(src, dst);
        }

        let encoder = PngEncoder::new_with_quality(
            sink,
            compression_type(self.compression),
            FilterType::Adaptive,
        );
        encoder
            .write_image(&rgba, view.width(), view.height(), ExtendedColorType::Rgba8)
            .map_err(|e| StillError::Encode(format!("Failed to write PNG: {e}")))
    }
}
