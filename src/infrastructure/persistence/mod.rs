//! 持久化实现

mod json_settings_store;

pub use json_settings_store::JsonSettingsStore;
