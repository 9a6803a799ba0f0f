//! Settings loading and validation.

use super::model::{Settings, default_lock_path};
use crate::error::{PatchlockError, Result};
use std::path::Path;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PatchlockError::Settings(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string, fill in the derived lock path if
    /// none was given, and validate.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| PatchlockError::Settings(format!("failed to parse settings YAML: {}", e)))?;

        if settings.lock_path.as_os_str().is_empty() {
            settings.lock_path = default_lock_path(&settings.config_path);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PatchlockError::Settings(format!("failed to serialize settings: {}", e)))
    }

    /// Validate settings values.
    ///
    /// Rules:
    /// - `config_path` must be non-empty
    /// - `lock_path` must differ from `config_path`
    /// - `opening_marker` and `sentinel` must be non-empty single lines
    /// - `heartbeat_stale_minutes` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Err(PatchlockError::Settings(
                "settings validation failed: config_path must be set".to_string(),
            ));
        }

        if self.lock_path == self.config_path {
            return Err(PatchlockError::Settings(
                "settings validation failed: lock_path must differ from config_path".to_string(),
            ));
        }

        validate_token("opening_marker", &self.opening_marker)?;
        validate_token("sentinel", &self.sentinel)?;

        if self.heartbeat_stale_minutes == 0 {
            return Err(PatchlockError::Settings(
                "settings validation failed: heartbeat_stale_minutes must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_token(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PatchlockError::Settings(format!(
            "settings validation failed: {} must be non-empty",
            name
        )));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(PatchlockError::Settings(format!(
            "settings validation failed: {} must be a single line",
            name
        )));
    }
    Ok(())
}
