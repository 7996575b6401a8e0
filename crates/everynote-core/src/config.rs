//! Application configuration

use everynote_notes::NotesConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

const DATA_DIR_ENV: &str = "EVERYNOTE_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Filter used when `RUST_LOG` is unset
    pub log_filter: String,
    pub notes: NotesConfig,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("everynote.db"),
            log_filter: "info".to_string(),
            notes: NotesConfig::default(),
        }
    }

    /// `$EVERYNOTE_DATA_DIR`, else the platform's local data directory.
    pub fn data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|d| d.join("EveryNote")))
            .unwrap_or_else(|| PathBuf::from(".everynote"))
    }

    /// Read a JSON config file. A missing file yields the defaults; missing
    /// keys take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
