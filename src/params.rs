//! Encoder selection and naming parameters.

use serde::Deserialize;

/// PNG codec backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Codec {
    /// The `image` crate's PNG encoder, fed a whole RGBA frame.
    #[default]
    Image,
    /// The `png` crate, streamed one row at a time.
    Png,
}

impl Codec {
    /// Name reported by the backend for this codec.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Png => "png",
        }
    }
}

/// Deflate effort requested from the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    /// Fastest encoding, larger files.
    Fast,
    /// The codec's default trade-off.
    #[default]
    Default,
    /// Smallest files, slowest encoding.
    Best,
}

/// Everything needed to create a codec backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct EncoderSettings {
    /// Backend to use.
    #[serde(default)]
    pub codec: Codec,
    /// Compression effort.
    #[serde(default)]
    pub compression: Compression,
}

/// Validate a still filename prefix.
///
/// An empty prefix is allowed; separators are not, since the prefix must
/// stay inside the output directory.
///
/// # Errors
///
/// Returns an error if the prefix contains a path separator.
pub fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.contains(['/', '\\']) {
        Err(format!("Prefix '{prefix}' must not contain a path separator"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = EncoderSettings::default();
        assert_eq!(settings.codec, Codec::Image);
        assert_eq!(settings.compression, Compression::Default);
    }

    #[test]
    fn settings_from_toml() {
        let settings: EncoderSettings = toml::from_str("codec = \"png\"\ncompression = \"best\"").unwrap();
        assert_eq!(settings.codec, Codec::Png);
        assert_eq!(settings.compression, Compression::Best);
    }

    #[test]
    fn validate_prefix_valid() {
        assert!(validate_prefix("still").is_ok());
        assert!(validate_prefix("").is_ok());
        assert!(validate_prefix("cam-1_").is_ok());
    }

    #[test]
    fn validate_prefix_rejects_separators() {
        assert!(validate_prefix("a/b").is_err());
        assert!(validate_prefix("..\\up").is_err());
    }
}
