//! Path resolution for configuration files

use std::path::PathBuf;

/// Resolves standard configuration locations
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
}

impl ConfigPaths {
    /// `None` when the platform has no config directory (no HOME)
    pub fn new() -> Option<Self> {
        let config_dir = dirs::config_dir()?.join("roster");
        Some(Self { config_dir })
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
