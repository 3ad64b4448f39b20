//! 应用层错误定义

use thiserror::Error;

use super::ports::StoreError;

/// 提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 页面没有可朗读的正文
    #[error("No readable content found on this page")]
    NoReadableContent,
}

/// 播放错误
///
/// 所有失败都只影响当前会话，控制器总会停在确定状态（Idle/Stopped），
/// 已持久化的参数不受影响
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No readable content found on this page")]
    NoReadableContent,

    #[error("Speech engine error: {0}")]
    Engine(String),

    #[error("Settings store error: {0}")]
    SettingsStore(String),

    #[error("Playback worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl From<ExtractError> for PlaybackError {
    fn from(_: ExtractError) -> Self {
        PlaybackError::NoReadableContent
    }
}

impl From<StoreError> for PlaybackError {
    fn from(err: StoreError) -> Self {
        PlaybackError::SettingsStore(err.to_string())
    }
}
