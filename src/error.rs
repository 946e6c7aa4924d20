//! Error type for rendering and exporting the diagram.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to parse SVG: {0}")]
    Svg(String),

    #[error("Rasterization failed: {0}")]
    Raster(String),
}

impl DiagramError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
