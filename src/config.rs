use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config file layout
// ---------------------------------------------------------------------------

/// Settings for both tools. Every field has a default, so an empty file (or no
/// file at all) reproduces the stock behaviour.
///
/// ```toml
/// [locations]
/// channels = [4, 120]
///
/// [spectrogram]
/// stream = "LFP"
/// freq_low = 1.0
/// freq_high = 100.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locations: LocationsConfig,
    pub spectrogram: SpectrogramConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationsConfig {
    /// Electrode indices looked up in every file.
    pub channels: Vec<usize>,
    /// File name suffix a directory entry must carry to be scanned.
    pub extension: String,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            channels: vec![4, 120],
            extension: ".nwb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrogramConfig {
    /// Name of the acquisition holding the LFP signal.
    pub stream: String,
    pub freq_low: f64,
    pub freq_high: f64,
    /// Column used when the signal is stored as (time, channel).
    pub channel: usize,
    /// Widest image (in time columns) handed to the renderer.
    pub max_width: usize,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            stream: "LFP".to_string(),
            freq_low: 1.0,
            freq_high: 100.0,
            channel: 0,
            max_width: 2048,
        }
    }
}

/// Read a TOML config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: Config = toml::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}
