use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Chart settings. Every field has a default, so a config file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// strftime format for the date axis labels.
    pub date_format: String,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub width: u32,
    pub height: u32,
    /// Image written on each successful load; `.png` selects the bitmap
    /// backend, anything else SVG.
    pub output: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Values by date".to_string(),
            x_title: "Date".to_string(),
            y_title: "Value".to_string(),
            date_format: "%d.%m.%Y".to_string(),
            x_ticks: 10,
            y_ticks: 10,
            width: 820,
            height: 400,
            output: PathBuf::from("chart.svg"),
        }
    }
}

impl ChartConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load from a YAML file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml(&text)?;
        info!(path = %path.display(), "loaded chart config");
        Ok(cfg)
    }
}
