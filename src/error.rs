//! Unified error type for framesnap.

use std::path::PathBuf;

use thiserror::Error;

use crate::frame::PixelFormat;

/// Errors that can occur while naming or writing a still.
#[derive(Debug, Error)]
pub enum StillError {
    /// The frame is not laid out as 8-bit BGRA.
    #[error("Video frame is not in 8-bit BGRA pixel format (got {0})")]
    UnsupportedPixelFormat(PixelFormat),

    /// The frame exposes no pixel buffer.
    #[error("Could not get video frame buffer")]
    MissingFrameBuffer,

    /// The frame geometry does not match its buffer.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Every sequential filename up to the limit is already taken.
    #[error("No free filename for prefix '{prefix}' in {}", dir.display())]
    NamesExhausted {
        /// Directory that was probed.
        dir: PathBuf,
        /// Filename prefix that was probed.
        prefix: String,
    },

    /// The writer was used after `uninitialize`.
    #[error("Image writer is not initialized")]
    NotInitialized,

    /// The PNG codec rejected the frame or failed mid-stream.
    #[error("Encoder error: {0}")]
    Encode(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON summary could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
