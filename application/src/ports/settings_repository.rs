//! Settings repository port
//!
//! Persistent key-value storage for the provider and API key.

use boa_domain::Settings;
use thiserror::Error;

/// Errors raised by a settings repository
#[derive(Error, Debug)]
pub enum SettingsStoreError {
    #[error("Settings storage unavailable: {0}")]
    Unavailable(String),

    #[error("Settings storage is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw persisted values, exactly as found in storage.
///
/// Either value may be missing; interpreting them (and applying defaults)
/// is the job of [`SettingsStore`](crate::use_cases::settings_store::SettingsStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
}

/// Storage backend for [`Settings`]
///
/// Storage is a convenience, not a source of truth: callers treat every
/// error as recoverable.
pub trait SettingsRepository: Send + Sync {
    /// Read the persisted values
    fn load(&self) -> Result<StoredSettings, SettingsStoreError>;

    /// Persist the settings. An empty key must be removed, not stored.
    fn save(&self, settings: &Settings) -> Result<(), SettingsStoreError>;
}

/// Repository that keeps nothing; every load comes back empty
pub struct NoSettingsRepository;

impl SettingsRepository for NoSettingsRepository {
    fn load(&self) -> Result<StoredSettings, SettingsStoreError> {
        Ok(StoredSettings::default())
    }

    fn save(&self, _settings: &Settings) -> Result<(), SettingsStoreError> {
        Ok(())
    }
}
