//! Settings store use case.
//!
//! Holds the user's provider and API key in memory, persists every change
//! through a [`SettingsRepository`], and derives the per-request
//! [`AiConfig`].

use crate::ports::settings_repository::{SettingsRepository, StoredSettings};
use boa_domain::core::string::mask_secret;
use boa_domain::{AiConfig, Provider, Settings};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Injectable settings store.
///
/// Storage is best-effort: read failures fall back to defaults and write
/// failures are logged and swallowed. The in-memory state is what counts.
pub struct SettingsStore {
    repository: Arc<dyn SettingsRepository>,
    settings: Mutex<Settings>,
}

impl SettingsStore {
    /// Load persisted settings, falling back to defaults. Never fails.
    pub fn load(repository: Arc<dyn SettingsRepository>) -> Self {
        let settings = match repository.load() {
            Ok(stored) => Self::interpret(stored),
            Err(e) => {
                warn!("Could not read settings, using defaults: {}", e);
                Settings::default()
            }
        };

        debug!(
            "Loaded settings: provider={}, ai_enabled={}",
            settings.provider.as_str(),
            settings.is_ai_enabled()
        );

        Self {
            repository,
            settings: Mutex::new(settings),
        }
    }

    fn interpret(stored: StoredSettings) -> Settings {
        let provider = match stored.provider.as_deref() {
            None => Provider::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring unknown stored provider '{}'", raw);
                Provider::default()
            }),
        };
        Settings::new(provider, stored.api_key.unwrap_or_default())
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        self.lock().clone()
    }

    pub fn provider(&self) -> Provider {
        self.lock().provider
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.lock().is_ai_enabled()
    }

    /// Config for the next request, or `None` when AI is disabled
    pub fn current_config(&self) -> Option<AiConfig> {
        self.lock().ai_config()
    }

    /// Key suitable for display, or `None` when no key is set
    pub fn masked_key(&self) -> Option<String> {
        let settings = self.lock();
        settings
            .is_ai_enabled()
            .then(|| mask_secret(settings.api_key.trim()))
    }

    /// Accept a new API key and auto-detect its provider.
    ///
    /// The key is trimmed before it is stored. A blank key clears the
    /// current one. Returns the provider now in effect.
    pub fn set_api_key(&self, key: &str) -> Provider {
        let key = key.trim();
        if key.is_empty() {
            self.clear();
            return self.provider();
        }

        let provider = Provider::detect_from_key(key);
        let snapshot = {
            let mut settings = self.lock();
            settings.api_key = key.to_string();
            settings.provider = provider;
            settings.clone()
        };
        info!("API key set, provider detected as {}", provider);
        self.persist(&snapshot);
        provider
    }

    /// Select a provider explicitly
    pub fn set_provider(&self, provider: Provider) {
        let snapshot = {
            let mut settings = self.lock();
            settings.provider = provider;
            settings.clone()
        };
        info!("Provider set to {}", provider);
        self.persist(&snapshot);
    }

    /// Forget the API key. The provider selection is kept.
    pub fn clear(&self) {
        let snapshot = {
            let mut settings = self.lock();
            settings.api_key.clear();
            settings.clone()
        };
        info!("API key cleared");
        self.persist(&snapshot);
    }

    fn persist(&self, settings: &Settings) {
        if let Err(e) = self.repository.save(settings) {
            warn!("Could not persist settings: {}", e);
        }
    }
}
