//! Pipeline configuration.
//!
//! # Responsibility
//! - Carry dataset/log/analyzer settings explicitly instead of module-level
//!   constants.
//! - Load settings from a JSON file with defaults for missing fields.
//!
//! # Invariants
//! - A missing config file is not an error for `load_or_default`.
//! - Relative paths are only resolved through `resolve_paths`.

use crate::analysis::DEFAULT_ANALYZER_BINARY;
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file name looked up by the CLI in its working directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "pipeline_config.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// External analyzer invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub binary: PathBuf,
    pub args: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_ANALYZER_BINARY),
            args: Vec::new(),
        }
    }
}

/// Top-level pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Dataset directory with `{i}_raw.txt` / `{i}_meta.json` pairs.
    pub assets_path: PathBuf,
    /// `None` falls back to the build-mode default.
    pub log_level: Option<String>,
    pub log_dir: PathBuf,
    /// Also write the `single_tagged` artifact.
    pub persist_tagged: bool,
    pub analyzer: AnalyzerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            assets_path: PathBuf::from("tmp").join("articles"),
            log_level: None,
            log_dir: PathBuf::from("logs"),
            persist_tagged: false,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads config from `path`, or returns defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Effective log level.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Resolves relative dataset and log paths against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.assets_path.is_relative() {
            self.assets_path = base.join(&self.assets_path);
        }
        if self.log_dir.is_relative() {
            self.log_dir = base.join(&self.log_dir);
        }
        self
    }
}
