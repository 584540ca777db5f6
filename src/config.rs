//! Configuration file handling.
//!
//! Loads settings from `<config dir>/asciigrid/config.toml` or a custom path.

use crate::charset::CharRange;
use crate::glyph::GLYPH_RESOLUTION;
use crate::{AsciiGridError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font file used to rasterize glyphs
    pub font: Option<PathBuf>,
    /// Font family named in HTML output
    pub font_family: String,
    /// File written by the HTML render target
    pub output_file: PathBuf,
    pub initial_chars_in_row: u32,
    /// Smallest block edge allowed; bounds `res up`
    pub min_pixels_per_char: u32,
    /// Starting character range, in `add` syntax
    pub initial_chars: String,
    pub glyph_resolution: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: None,
            font_family: "Courier New".to_string(),
            output_file: PathBuf::from("out.html"),
            initial_chars_in_row: 64,
            min_pixels_per_char: 2,
            initial_chars: "0-9".to_string(),
            glyph_resolution: GLYPH_RESOLUTION,
        }
    }
}

impl Config {
    /// Load configuration from a file path, or the default location.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| AsciiGridError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| AsciiGridError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.min_pixels_per_char == 0 {
            return Err("min_pixels_per_char must be at least 1".to_string());
        }
        if self.glyph_resolution == 0 {
            return Err("glyph_resolution must be at least 1".to_string());
        }
        if self.initial_chars_in_row == 0 {
            return Err("initial_chars_in_row must be at least 1".to_string());
        }
        if CharRange::parse(&self.initial_chars).is_none() {
            return Err(format!("initial_chars is not a valid range: {:?}", self.initial_chars));
        }
        Ok(())
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "asciigrid")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("asciigrid.toml"))
}
