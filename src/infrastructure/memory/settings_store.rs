//! In-Memory Settings Store Implementation

use async_trait::async_trait;
use std::sync::RwLock;

use crate::application::ports::{SettingsStorePort, StoreError};
use crate::domain::settings::ReadingSettings;

/// 内存参数存储
///
/// 测试与单次运行的宿主使用；进程退出即丢失
pub struct InMemorySettingsStore {
    settings: RwLock<ReadingSettings>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(ReadingSettings::default()),
        }
    }

    pub fn with_settings(settings: ReadingSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStorePort for InMemorySettingsStore {
    async fn get(&self) -> Result<ReadingSettings, StoreError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn set(&self, settings: ReadingSettings) -> Result<(), StoreError> {
        let mut guard = self
            .settings
            .write()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_defaults_before_set() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.get().await.unwrap(), ReadingSettings::default());
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let store = InMemorySettingsStore::new();
        let settings = ReadingSettings {
            voice_index: 2,
            rate: 1.25,
            pitch: 0.9,
            volume: 0.7,
        };

        store.set(settings.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), settings);
    }
}
