//! Settings Store Port - 朗读参数持久化抽象
//!
//! 控制器在会话开始时读取一份快照，播放过程中从不写回

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::settings::ReadingSettings;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Settings Store Port
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    /// 读取当前参数（尚未保存过时返回默认值）
    async fn get(&self) -> Result<ReadingSettings, StoreError>;

    /// 保存参数
    async fn set(&self, settings: ReadingSettings) -> Result<(), StoreError>;
}
