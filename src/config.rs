//! proplan configuration.
//!
//! Loaded from `~/.proplan/config.toml`. Every key is optional and a missing
//! file means all defaults. The data directory is resolved through a chain:
//!
//! 1. `PROPLAN_DATA_DIR` env var
//! 2. `data-dir` in the config file
//! 3. `~/.proplan/data`

use std::{env, fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

/// proplan configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where the database lives.
    pub data_dir: Option<PathBuf>,

    /// Whether a brand-new database starts with the demo board.
    pub seed_demo_data: bool,

    /// How log lines are written to stderr.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_demo_data: true,
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load config from `~/.proplan/config.toml`, or defaults if it's absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it doesn't exist.
    pub fn load_from(path: &std::path::Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.proplan/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".proplan").join("config.toml"))
    }

    /// Resolve the data directory from env, file, then the default.
    pub fn data_dir(&self) -> Result<PathBuf, String> {
        if let Ok(dir) = env::var("PROPLAN_DATA_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::home_dir()
            .map(|h| h.join(".proplan").join("data"))
            .ok_or_else(|| "could not determine home directory".to_string())
    }
}
