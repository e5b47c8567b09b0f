//! Adapter implementations for port traits.
//!
//! - `image_png` — whole-frame encoding through the `image` crate
//! - `png_stream` — row-streamed encoding through the `png` crate

pub mod image_png;
pub mod png_stream;

pub use image_png::ImagePngEncoder;
pub use png_stream::StreamingPngEncoder;
