//! Still encoder port for external PNG codecs.

use std::io::Write;

use crate::error::StillError;
use crate::frame::Bgra32View;

/// Encodes a validated BGRA32 frame into a complete PNG container.
///
/// Output is 8-bit RGBA with the source alpha channel preserved.
pub trait StillEncoder: Send + Sync {
    /// Short backend name, reported in summaries and logs.
    fn name(&self) -> &'static str;

    /// Encode `view` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec rejects the frame or the sink fails.
    fn encode(&self, view: &Bgra32View<'_>, sink: &mut dyn Write) -> Result<(), StillError>;
}
