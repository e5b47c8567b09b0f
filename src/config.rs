//! Configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::params::EncoderSettings;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where stills go and how they are named.
    #[serde(default)]
    pub output: OutputConfig,

    /// Codec backend settings.
    #[serde(default)]
    pub encoder: EncoderSettings,
}

/// Output location defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory stills are written to.
    pub dir: PathBuf,
    /// Filename prefix before the four-digit sequence number.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("."), prefix: "still".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `FRAMESNAP_CONFIG` environment variable
/// 3. `~/.config/framesnap/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var("FRAMESNAP_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/framesnap/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/framesnap/config.toml")
    } else {
        PathBuf::from("framesnap.toml")
    }
}
