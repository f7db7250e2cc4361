//! TOML file settings repository
//!
//! Stores the provider and API key in a small TOML file under the user's
//! config directory:
//!
//! ```toml
//! provider = "anthropic"
//! api_key = "sk-ant-..."
//! ```

use crate::config::APP_DIR;
use boa_application::ports::settings_repository::{
    SettingsRepository, SettingsStoreError, StoredSettings,
};
use boa_domain::Settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// Settings persisted as a TOML file
pub struct TomlSettingsRepository {
    path: PathBuf,
}

impl TomlSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the platform default location, if one exists
    pub fn at_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// `$XDG_CONFIG_HOME/book-of-answers/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_private(&self, contents: &str) -> Result<(), SettingsStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl SettingsRepository for TomlSettingsRepository {
    fn load(&self) -> Result<StoredSettings, SettingsStoreError> {
        if !self.path.exists() {
            debug!("No settings file at {}", self.path.display());
            return Ok(StoredSettings::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        let file: SettingsFile = toml::from_str(&contents)
            .map_err(|e| SettingsStoreError::Corrupt(e.to_string()))?;

        Ok(StoredSettings {
            provider: file.provider,
            api_key: file.api_key.filter(|k| !k.is_empty()),
        })
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsStoreError> {
        let file = SettingsFile {
            provider: Some(settings.provider.as_str().to_string()),
            api_key: (!settings.api_key.is_empty()).then(|| settings.api_key.clone()),
        };
        let contents = toml::to_string(&file)
            .map_err(|e| SettingsStoreError::Unavailable(e.to_string()))?;
        self.write_private(&contents)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
