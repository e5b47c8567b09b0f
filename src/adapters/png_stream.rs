//! PNG backend driving the `png` crate row by row.

use std::io::Write;

use crate::error::StillError;
use crate::frame::{bgra_to_rgba, Bgra32View};
use crate::params::Compression;
use crate::ports::StillEncoder;

/// Streams swizzled rows straight into the `png` crate's deflate stream.
///
/// Only one row is held in memory, so padded capture buffers never get a
/// full-frame copy.
pub struct StreamingPngEncoder {
    compression: Compression,
}

impl StreamingPngEncoder {
    /// Create an encoder with the given compression effort.
    #[must_use]
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }
}

fn png_compression(compression: Compression) -> png::Compression {
    match compression {
        Compression::Fast => png::Compression::Fast,
        Compression::Default => png::Compression::Default,
        Compression::Best => png::Compression::Best,
    }
}

fn encode_error(e: png::EncodingError) -> StillError {
    match e {
        png::EncodingError::IoError(io) => StillError::Io(io),
        other => StillError::Encode(other.to_string()),
    }
}

impl StillEncoder for StreamingPngEncoder {
    fn name(&self) -> &'static str {
        "png"
    }

    fn encode(&self, view: &Bgra32View<'_>, sink: &mut dyn Write) -> Result<(), StillError> {
        let mut encoder = png::Encoder::new(sink, view.width(), view.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png_compression(self.compression));

        let mut writer = encoder.write_header().map_err(encode_error)?;
        let packed = view.packed_row_len();
        {
            let mut stream = writer.stream_writer_with_size(packed).map_err(encode_error)?;
            let mut row = vec![0u8; packed];
            for src in view.rows() {
                bgra_to_rgba(src, &mut row);
                stream.write_all(&row)?;
            }
            stream.finish().map_err(encode_error)?;
        }
        writer.finish().map_err(encode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::RawVideoFrame;

    #[test]
    fn encodes_padded_frame() {
        // 2x2 frame with 4 bytes of padding per row.
        let data = vec![
            10, 20, 30, 255, 40, 50, 60, 255, 0, 0, 0, 0, //
            70, 80, 90, 0, 1, 2, 3, 4, 9, 9, 9, 9,
        ];
        let frame = RawVideoFrame::bgra(2, 2, data).with_row_bytes(12);
        let view = Bgra32View::from_frame(&frame).unwrap();

        let mut out = Vec::new();
        StreamingPngEncoder::new(Compression::Best).encode(&view, &mut out).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [30, 20, 10, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [60, 50, 40, 255]);
        assert_eq!(decoded.get_pixel(0, 1).0, [90, 80, 70, 0]);
        assert_eq!(decoded.get_pixel(1, 1).0, [3, 2, 1, 4]);
    }

    /// Smooth 128x128 gradient that deflate can squeeze.
    fn gradient_frame() -> RawVideoFrame {
        let data = (0..128u32 * 128)
            .flat_map(|i| {
                let (x, y) = (i % 128, i / 128);
                let b = u8::try_from(x).unwrap();
                let g = u8::try_from(y).unwrap();
                let r = u8::try_from((x + y) / 2).unwrap();
                [b, g, r, 0xFF]
            })
            .collect();
        RawVideoFrame::bgra(128, 128, data)
    }

    #[test]
    fn best_compression_is_smaller_than_fast() {
        let frame = gradient_frame();
        let view = Bgra32View::from_frame(&frame).unwrap();

        let mut fast = Vec::new();
        StreamingPngEncoder::new(Compression::Fast).encode(&view, &mut fast).unwrap();
        let mut best = Vec::new();
        StreamingPngEncoder::new(Compression::Best).encode(&view, &mut best).unwrap();

        assert!(best.len() < fast.len(), "best {} bytes, fast {} bytes", best.len(), fast.len());
        assert_eq!(image::load_from_memory(&best).unwrap().to_rgba8().get_pixel(5, 3).0, [4, 3, 5, 0xFF]);
    }
}
