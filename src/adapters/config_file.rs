//! JSON file configuration adapter.
//!
//! Loads and persists [`DoorConfig`] as pretty-printed JSON. Used by the
//! host simulation binary; on device the NVS adapter is preferred, but
//! this also works against a mounted VFS path.

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::DoorConfig;

pub struct FileConfigAdapter {
    path: PathBuf,
}

impl FileConfigAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn load(&self) -> Result<DoorConfig, ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound);
            }
            Err(_) => return Err(ConfigError::IoError),
        };
        let config: DoorConfig =
            serde_json::from_str(&contents).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::ValidationFailed)?;
        debug!("config loaded from {}", self.path.display());
        Ok(config)
    }

    fn save(&mut self, config: &DoorConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let json = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        fs::write(&self.path, json).map_err(|_| ConfigError::IoError)?;
        debug!("config saved to {}", self.path.display());
        Ok(())
    }
}
