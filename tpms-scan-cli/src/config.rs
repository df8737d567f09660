//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub radio: RadioConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Radio capture subprocess settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RadioConfig {
    /// Capture binary to spawn
    #[serde(default = "default_rtl433_bin")]
    pub rtl433_bin: String,
    /// Tuner frequency in Hz (TPMS sensors broadcast around 433.92 MHz)
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u64,
    /// Extra arguments passed through to the capture binary
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_rtl433_bin() -> String {
    "rtl_433".to_string()
}

fn default_frequency_hz() -> u64 {
    433_920_000
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            rtl433_bin: default_rtl433_bin(),
            frequency_hz: default_frequency_hz(),
            extra_args: Vec::new(),
        }
    }
}

/// Scan window settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Listen duration per wheel, in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Whether the spare wheel is scanned as a fifth position
    #[serde(default = "default_include_spare")]
    pub include_spare: bool,
}

fn default_window_secs() -> u64 {
    30
}

fn default_include_spare() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            include_spare: default_include_spare(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line overrides applied on top of the file configuration
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub window_secs: Option<u64>,
    pub frequency_hz: Option<u64>,
    pub rtl433_bin: Option<String>,
    pub skip_spare: bool,
    pub json: bool,
}

impl AppConfig {
    /// Apply command-line overrides; a set flag always wins over the file
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(secs) = overrides.window_secs {
            self.scan.window_secs = secs;
        }
        if let Some(hz) = overrides.frequency_hz {
            self.radio.frequency_hz = hz;
        }
        if let Some(bin) = &overrides.rtl433_bin {
            self.radio.rtl433_bin = bin.clone();
        }
        if overrides.skip_spare {
            self.scan.include_spare = false;
        }
        if overrides.json {
            self.output.format = OutputFormat::Json;
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
