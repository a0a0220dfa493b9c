//! Startup configuration: a JSON file plus environment overrides.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
pub const CONFIG_FILE_ENV: &str = "SCOPETRACE_CONFIG";
pub const DATA_DIR_ENV: &str = "SCOPETRACE_DATA_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "scopetrace.json";
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub png_width: u32,
    pub png_height: u32,
}
impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            window_width: 720.0,
            window_height: 420.0,
            png_width: 1200,
            png_height: 600,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the file picker opens, e.g. a mounted lab share.
    pub data_dir: Option<PathBuf>,
    pub figure: FigureConfig,
}
impl AppConfig {
    /// Resolves the configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }
    pub fn resolve(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = env(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::from_file(&path)?;
        if let Some(dir) = env(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        debug!("resolved configuration: {config:?}");
        Ok(config)
    }
    /// Reads `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("using configuration {}", path.display());
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid configuration file {}", path.display()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }
}
