//! Sequential still file naming.

use std::path::{Path, PathBuf};

use crate::error::StillError;
use crate::params::validate_prefix;

/// Number of sequence slots; names run from `0000` to `9999`.
pub const MAX_SEQUENCE: u32 = 10_000;

/// Build the file name for sequence slot `index`.
#[must_use]
pub fn still_filename(prefix: &str, index: u32) -> String {
    format!("{prefix}{index:04}.png")
}

/// Hands out the next unused `{prefix}NNNN.png` name.
///
/// The counter advances on every probe and never rewinds, so consecutive
/// calls resume where the last one stopped, across any directory or prefix.
#[derive(Debug, Default)]
pub struct FilenameSequence {
    next: u32,
}

impl FilenameSequence {
    /// Create a sequence starting at slot zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the next name in `dir` that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is invalid or every remaining slot is
    /// taken. Once exhausted the sequence stays exhausted.
    pub fn next_in(&mut self, dir: &Path, prefix: &str) -> Result<PathBuf, StillError> {
        validate_prefix(prefix).map_err(StillError::InvalidArgument)?;

        while self.next < MAX_SEQUENCE {
            let candidate = dir.join(still_filename(prefix, self.next));
            self.next += 1;
            if !candidate.exists() {
                log::debug!("Next still name: {}", candidate.display());
                return Ok(candidate);
            }
        }

        Err(StillError::NamesExhausted { dir: dir.to_path_buf(), prefix: prefix.to_string() })
    }
}
