//! Playback Controller - 顺序朗读状态机
//!
//! 状态机：Idle -> Reading(index) -> Stopped。
//! 由两类输入驱动：外部命令（start/stop/previous/next）和引擎的
//! 完成/失败事件。块 n+1 只会在块 n 的事件回调中提交，绝不预先提交，
//! 因此发声天然串行、不重叠。
//!
//! 每个会话持有一个随机令牌，utterance 事件携带 (令牌, 块索引)；
//! 令牌或索引不匹配的事件属于已结束的会话，直接丢弃。

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::PlaybackError;
use crate::application::extractor::extract_page_text;
use crate::application::ports::{
    DocumentPort, EngineEvent, SettingsStorePort, SpeechEnginePort, StatusSinkPort, StatusUpdate,
    UtteranceHandle, UtteranceRequest,
};
use crate::config::{ChunkingConfig, ExtractionConfig};
use crate::domain::chunker::{split_into_chunks, ChunkConfig};
use crate::domain::settings::ReadingSettings;

/// 播放进度（current 为 1-based，未在朗读时为 {0, 0}）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackProgress {
    pub current: usize,
    pub total: usize,
}

/// 控制器状态
enum ControllerState {
    Idle,
    Reading(ReadingSession),
    Stopped,
}

/// 一次朗读会话的全部状态，stop 时整体丢弃
struct ReadingSession {
    token: Uuid,
    chunks: Vec<String>,
    current_index: usize,
    /// 提交序号，每次 speak_current 递增；同一索引重复提交时
    /// 用于区分旧提交的迟到回调
    attempt: u64,
    settings: ReadingSettings,
}

/// 顺序朗读控制器
pub struct PlaybackController {
    document: Arc<dyn DocumentPort>,
    engine: Arc<dyn SpeechEnginePort>,
    settings_store: Arc<dyn SettingsStorePort>,
    status: Arc<dyn StatusSinkPort>,
    extraction: ExtractionConfig,
    chunking: ChunkConfig,
    state: ControllerState,
}

impl PlaybackController {
    pub fn new(
        document: Arc<dyn DocumentPort>,
        engine: Arc<dyn SpeechEnginePort>,
        settings_store: Arc<dyn SettingsStorePort>,
        status: Arc<dyn StatusSinkPort>,
        extraction: ExtractionConfig,
        chunking: ChunkingConfig,
    ) -> Self {
        Self {
            document,
            engine,
            settings_store,
            status,
            extraction,
            chunking: ChunkConfig {
                max_chunk_chars: chunking.max_chunk_chars,
            },
            state: ControllerState::Idle,
        }
    }

    /// 开始朗读
    ///
    /// 已在朗读时先做一次完整的会话重置（不是暂停）。
    /// 参数快照优先使用 override，否则读取存储；存储读取失败回退默认值。
    pub async fn start(
        &mut self,
        settings_override: Option<ReadingSettings>,
    ) -> Result<(), PlaybackError> {
        if self.is_active() {
            self.stop();
        }

        let settings = match settings_override {
            Some(s) => s,
            None => match self.settings_store.get().await {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load settings, using defaults");
                    ReadingSettings::default()
                }
            },
        }
        .sanitized();

        let text = match extract_page_text(self.document.as_ref(), &self.extraction) {
            Ok(text) => text,
            Err(e) => {
                self.status
                    .report(StatusUpdate::new(false, e.to_string()));
                self.state = ControllerState::Idle;
                return Err(e.into());
            }
        };

        let chunks = split_into_chunks(&text, &self.chunking);
        // 纯标点等无句文本提取后非空但切不出块，按无正文处理
        if chunks.is_empty() {
            let err = PlaybackError::NoReadableContent;
            self.status.report(StatusUpdate::new(false, err.to_string()));
            self.state = ControllerState::Idle;
            return Err(err);
        }
        let total = chunks.len();

        self.state = ControllerState::Reading(ReadingSession {
            token: Uuid::new_v4(),
            chunks,
            current_index: 0,
            attempt: 0,
            settings,
        });

        self.status.report(StatusUpdate::new(
            true,
            format!("Reading page content ({} chunks)", total),
        ));
        tracing::info!(total_chunks = total, "Reading session started");

        self.speak_current();
        Ok(())
    }

    /// 停止朗读并清空会话状态
    pub fn stop(&mut self) {
        self.engine.cancel();
        self.state = ControllerState::Stopped;
        self.status
            .report(StatusUpdate::new(false, "Reading stopped"));
        tracing::info!("Reading session stopped");
    }

    /// 跳到上一块（仅在朗读中有效，索引 0 处为 no-op）
    pub fn previous(&mut self) {
        if let ControllerState::Reading(session) = &mut self.state {
            if session.current_index > 0 {
                session.current_index -= 1;
                self.speak_current();
            }
        }
    }

    /// 跳到下一块（仅在朗读中有效，末尾处为 no-op）
    pub fn next(&mut self) {
        if let ControllerState::Reading(session) = &mut self.state {
            if session.current_index + 1 < session.chunks.len() {
                session.current_index += 1;
                self.speak_current();
            }
        }
    }

    /// 处理引擎事件
    ///
    /// 过期回调（令牌、索引或提交序号不匹配当前会话）直接丢弃，
    /// 不触碰任何状态
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let handle = event.handle();

        let session = match &mut self.state {
            ControllerState::Reading(session)
                if session.token == handle.session
                    && session.current_index == handle.chunk_index
                    && session.attempt == handle.attempt =>
            {
                session
            }
            _ => {
                tracing::debug!(
                    session = %handle.session,
                    chunk_index = handle.chunk_index,
                    "Ignoring stale engine event"
                );
                return;
            }
        };

        match event {
            EngineEvent::Completed { .. } => {
                session.current_index += 1;
                if session.current_index >= session.chunks.len() {
                    tracing::info!("Reading session finished");
                    self.stop();
                } else {
                    self.speak_current();
                }
            }
            EngineEvent::Failed { error, .. } => {
                tracing::error!(error = %error, "Speech engine reported failure");
                self.status
                    .report(StatusUpdate::new(false, "Error occurred while reading"));
                self.stop();
            }
        }
    }

    /// 当前进度
    pub fn progress(&self) -> PlaybackProgress {
        match &self.state {
            ControllerState::Reading(session) => PlaybackProgress {
                current: session.current_index + 1,
                total: session.chunks.len(),
            },
            _ => PlaybackProgress::default(),
        }
    }

    /// 是否正在朗读
    pub fn is_active(&self) -> bool {
        matches!(self.state, ControllerState::Reading(_))
    }

    /// 播放当前索引指向的块
    ///
    /// 提交前总是先 cancel，维持"最多一个 utterance 在播"的不变式
    fn speak_current(&mut self) {
        let next = match &mut self.state {
            ControllerState::Reading(session) => {
                if session.current_index >= session.chunks.len() {
                    None
                } else {
                    session.attempt += 1;
                    let handle = UtteranceHandle {
                        session: session.token,
                        chunk_index: session.current_index,
                        attempt: session.attempt,
                    };
                    Some((
                        handle,
                        session.chunks[session.current_index].clone(),
                        session.settings.clone(),
                    ))
                }
            }
            _ => return,
        };

        let (handle, text, settings) = match next {
            Some(next) => next,
            None => {
                // 索引越过块序列末尾，按会话读完处理
                self.stop();
                return;
            }
        };

        // 音色索引钳制到可用范围
        let voices = self.engine.list_voices();
        let voice_id = if voices.is_empty() {
            None
        } else {
            let index = settings.voice_index.min(voices.len() - 1);
            Some(voices[index].id.clone())
        };

        let request = UtteranceRequest::new(handle, text, voice_id, &settings);
        let progress = self.progress();

        self.engine.cancel();
        if let Err(e) = self.engine.submit(request) {
            tracing::error!(error = %e, "Failed to submit utterance");
            self.status
                .report(StatusUpdate::new(false, "Error occurred while reading"));
            self.stop();
            return;
        }

        tracing::debug!(
            current = progress.current,
            total = progress.total,
            "Speaking chunk"
        );
    }
}
