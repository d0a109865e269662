use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ShellError};

pub const DEFAULT_VFS_PATH: &str = "/default/vfs";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    // display only, nothing is mounted
    pub vfs_path: String,
    // none means interactive
    pub script: Option<PathBuf>,
    pub debug: bool,
    pub history: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            vfs_path: DEFAULT_VFS_PATH.to_string(),
            script: None,
            debug: false,
            history: true,
        }
    }
}

impl ShellConfig {
    /// Load a toml file, missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ShellError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml(&text).map_err(|reason| ShellError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn from_toml(text: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.message().to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.vfs_path.trim().is_empty() {
            return Err("vfs_path must not be empty".to_string());
        }
        Ok(())
    }
}
