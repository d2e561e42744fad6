//! Board configuration loaded through Figment
//!
//! Sources merge in precedence order, later winning:
//!
//! 1. built-in defaults
//! 2. `chat2canvas.toml`, `chat2canvas.yaml` or `chat2canvas.json` in the
//!    configuration directory
//! 3. environment variables prefixed `CHAT2CANVAS_` (`CHAT2CANVAS_DEBOUNCE_MS=500`)

use crate::auto_color::SLATE;
use crate::error::{BoardError, Result};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "chat2canvas";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "CHAT2CANVAS_";

/// Default key the snapshot is stored under
pub const DEFAULT_SNAPSHOT_KEY: &str = "chat2canvas-projects";

/// Default quiet period before a snapshot write
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Directory holding the snapshot file
    pub storage_dir: PathBuf,
    /// Key (file stem) the snapshot is stored under
    pub snapshot_key: String,
    /// Milliseconds of quiet before a scheduled save is written
    pub debounce_ms: u64,
    /// Color for columns created without one
    pub default_column_color: String,
    /// Color for cards created without one
    pub default_card_color: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_column_color: SLATE.to_string(),
            default_card_color: SLATE.to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration with files looked up in `config_dir`
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config: Self = Self::figment(config_dir).extract()?;
        config.validate()?;
        debug!(
            storage_dir = %config.storage_dir.display(),
            debounce_ms = config.debounce_ms,
            "loaded board configuration"
        );
        Ok(config)
    }

    /// Load configuration with files looked up in the current directory
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(&cwd)
    }

    /// The merged provider chain, before extraction
    pub fn figment(config_dir: &Path) -> Figment {
        let file = |ext: &str| config_dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext));
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file("toml")))
            .merge(Yaml::file(file("yaml")))
            .merge(Json::file(file("json")))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_key.trim().is_empty() {
            return Err(BoardError::config("snapshot_key must not be empty"));
        }
        if self.default_column_color.trim().is_empty() {
            return Err(BoardError::config("default_column_color must not be empty"));
        }
        if self.default_card_color.trim().is_empty() {
            return Err(BoardError::config("default_card_color must not be empty"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        crate::persistence::FileKeyValueStore::new(&self.storage_dir).path_for(&self.snapshot_key)
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("chat2canvas"))
        .unwrap_or_else(|| PathBuf::from(".chat2canvas"))
}
