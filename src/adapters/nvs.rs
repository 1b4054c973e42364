//! NVS configuration adapter (ESP-IDF only).
//!
//! Persists [`DoorConfig`] as a postcard-encoded blob in the default NVS
//! partition. Writes are atomic at the IDF level, so a power loss mid-save
//! leaves the previous blob intact.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::debug;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::DoorConfig;

const NAMESPACE: &str = "doorctl";
const CONFIG_KEY: &str = "config";

/// Largest serialized config we accept; the postcard blob for a
/// fully-populated [`DoorConfig`] is well under this.
const MAX_BLOB_LEN: usize = 128;

pub struct NvsConfigAdapter {
    nvs: EspNvs<NvsDefault>,
}

impl NvsConfigAdapter {
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, ConfigError> {
        let nvs = EspNvs::new(partition, NAMESPACE, true).map_err(|_| ConfigError::IoError)?;
        Ok(Self { nvs })
    }
}

impl ConfigPort for NvsConfigAdapter {
    fn load(&self) -> Result<DoorConfig, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_LEN];
        let blob = self
            .nvs
            .get_blob(CONFIG_KEY, &mut buf)
            .map_err(|_| ConfigError::IoError)?
            .ok_or(ConfigError::NotFound)?;
        let config: DoorConfig =
            postcard::from_bytes(blob).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::ValidationFailed)?;
        debug!("config loaded from NVS ({} bytes)", blob.len());
        Ok(config)
    }

    fn save(&mut self, config: &DoorConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.nvs
            .set_blob(CONFIG_KEY, &bytes)
            .map_err(|_| ConfigError::IoError)?;
        debug!("config saved to NVS ({} bytes)", bytes.len());
        Ok(())
    }
}
