//! Settings persistence adapters

mod file_settings;

pub use file_settings::TomlSettingsRepository;
