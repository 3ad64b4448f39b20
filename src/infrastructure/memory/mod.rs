//! 内存实现

mod settings_store;

pub use settings_store::InMemorySettingsStore;
