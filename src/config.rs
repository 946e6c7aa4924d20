//! Render configuration.
//!
//! [`RenderConfig`] is read from TOML; every key is optional and falls back
//! to the defaults below. Command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::error::{DiagramError, Result};
use crate::palette::Palette;
use crate::render::RenderOptions;

/// Picked up from the working directory when no explicit file is given.
pub const LOCAL_CONFIG_FILE: &str = "workflow-diagram.toml";

const DEFAULT_OUTPUT: &str = "langgraph_architecture.png";
const DEFAULT_DPI: f32 = 300.0;
const DEFAULT_PAD_INCHES: f32 = 0.1;
const DEFAULT_FONTS_DIR: &str = "fonts";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default = "default_pad_inches")]
    pub pad_inches: f32,
    #[serde(default = "default_tight")]
    pub tight: bool,
    /// Extra fonts for measurement and rasterization; ignored when missing.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,
    #[serde(default)]
    pub palette: Palette,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}
fn default_dpi() -> f32 {
    DEFAULT_DPI
}
fn default_pad_inches() -> f32 {
    DEFAULT_PAD_INCHES
}
fn default_tight() -> bool {
    true
}
fn default_fonts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FONTS_DIR)
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            dpi: default_dpi(),
            pad_inches: default_pad_inches(),
            tight: default_tight(),
            fonts_dir: default_fonts_dir(),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DiagramError::Config(e.to_string()))
    }

    /// Loads the explicit file if given, else [`LOCAL_CONFIG_FILE`] when it
    /// exists, else the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            info!(path = path.display().to_string(); "Loading configuration from explicit path");
            if !path.is_file() {
                return Err(DiagramError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            info!(path = LOCAL_CONFIG_FILE; "Loading configuration from local path");
            return Self::load_file(local);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DiagramError::io(path, e))?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(DiagramError::InvalidSetting(format!(
                "dpi must be a positive number, got {}",
                self.dpi
            )));
        }
        if !self.pad_inches.is_finite() || self.pad_inches < 0.0 {
            return Err(DiagramError::InvalidSetting(format!(
                "pad_inches must be zero or positive, got {}",
                self.pad_inches
            )));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            tight: self.tight,
            pad_inches: self.pad_inches,
        }
    }
}
