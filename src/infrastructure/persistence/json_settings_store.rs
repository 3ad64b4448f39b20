//! JSON File Settings Store Implementation
//!
//! 单个 JSON 文件保存朗读参数；文件不存在视为从未保存过，返回默认值

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{SettingsStorePort, StoreError};
use crate::domain::settings::ReadingSettings;

/// JSON 文件参数存储
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStorePort for JsonSettingsStore {
    async fn get(&self) -> Result<ReadingSettings, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ReadingSettings::default());
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn set(&self, settings: ReadingSettings) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(&settings)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(store.get().await.unwrap(), ReadingSettings::default());
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("nested/settings.json"));

        let settings = ReadingSettings {
            voice_index: 1,
            rate: 1.5,
            pitch: 1.2,
            volume: 0.6,
        };
        store.set(settings.clone()).await.unwrap();

        assert_eq!(store.get().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = JsonSettingsStore::new(path);
        assert!(matches!(
            store.get().await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, br#"{"rate": 2.0}"#).await.unwrap();

        let store = JsonSettingsStore::new(path);
        let settings = store.get().await.unwrap();
        assert_eq!(settings.rate, 2.0);
        assert_eq!(settings.volume, 1.0);
    }
}
