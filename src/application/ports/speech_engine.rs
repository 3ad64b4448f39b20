//! Speech Engine Port - 语音合成引擎抽象
//!
//! 提交是非阻塞的；完成/失败事件通过引擎构造时注入的 mpsc 通道异步回传。
//! 事件携带 UtteranceHandle，控制器据此丢弃过期会话的回调。

use thiserror::Error;
use uuid::Uuid;

use crate::domain::settings::ReadingSettings;

/// 语音引擎错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// 发声句柄
///
/// 标识一次 utterance 提交：会话令牌 + 块索引 + 会话内提交序号。
/// 引擎回传事件时原样携带，任一字段不匹配的事件视为过期回调被忽略；
/// 序号用于区分同一索引被重新提交后旧提交的迟到回调。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceHandle {
    pub session: Uuid,
    pub chunk_index: usize,
    pub attempt: u64,
}

/// 发声请求
#[derive(Debug, Clone)]
pub struct UtteranceRequest {
    pub handle: UtteranceHandle,
    /// 要朗读的文本块
    pub text: String,
    /// 音色 ID（None 时使用引擎默认音色）
    pub voice_id: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl UtteranceRequest {
    /// 由朗读参数构造请求
    pub fn new(
        handle: UtteranceHandle,
        text: impl Into<String>,
        voice_id: Option<String>,
        settings: &ReadingSettings,
    ) -> Self {
        Self {
            handle,
            text: text.into(),
            voice_id,
            rate: settings.rate,
            pitch: settings.pitch,
            volume: settings.volume,
        }
    }
}

/// 引擎事件
///
/// 一次提交之后恰好回传 Completed 或 Failed 之一；cancel 掉的提交不回传
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// 发声正常播完
    Completed { handle: UtteranceHandle },
    /// 发声失败
    Failed {
        handle: UtteranceHandle,
        error: String,
    },
}

impl EngineEvent {
    pub fn handle(&self) -> UtteranceHandle {
        match self {
            EngineEvent::Completed { handle } => *handle,
            EngineEvent::Failed { handle, .. } => *handle,
        }
    }
}

/// 可用音色信息
#[derive(Debug, Clone)]
pub struct VoiceInfo {
    pub id: String,
    pub display_name: String,
}

/// Speech Engine Port
///
/// 控制器独占引擎：提交前总是先 cancel，保证同时最多一个 utterance 在播
pub trait SpeechEnginePort: Send + Sync {
    /// 提交一段文本开始播放（非阻塞）
    fn submit(&self, request: UtteranceRequest) -> Result<(), SpeechError>;

    /// 立即取消当前播放（同步生效，被取消的提交不再回传事件）
    fn cancel(&self);

    /// 列出可用音色
    fn list_voices(&self) -> Vec<VoiceInfo>;
}
