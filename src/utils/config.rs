use super::changelog::ChangelogConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "changelog-helper.toml";

/// main configuration for changelog-helper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelperConfig {
    /// changelog and release notes settings
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

impl HelperConfig {
    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: HelperConfig = toml::from_str(&contents).map_err(|e| Error::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// find and load `changelog-helper.toml` in `dir`
    ///
    /// returns default config if the file is missing or broken
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Self {
        match Self::find_config_file(&dir) {
            Some(config_path) => Self::load_from_file(&config_path).unwrap_or_else(|e| {
                warn!("{}, falling back to default configuration", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// find configuration file in `dir`
    pub fn find_config_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let config_path = dir.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }
}
