//! Page Reader - 组装入口
//!
//! 按配置把提取、分块、控制器、引擎、存储、状态广播接成一条链路，
//! 并在后台启动播放工作循环。嵌入方只跟 PlaybackHandle 和状态
//! 订阅打交道。

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::application::controller::PlaybackController;
use crate::application::error::PlaybackError;
use crate::application::ports::{
    DocumentPort, EngineEvent, SettingsStorePort, SpeechEnginePort, StatusUpdate,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::EspeakEngine;
use crate::infrastructure::events::StatusPublisher;
use crate::infrastructure::persistence::JsonSettingsStore;
use crate::infrastructure::worker::{PlaybackHandle, PlaybackWorker};

/// 页面朗读器
///
/// 一个文档对应一个实例；多个实例互不干扰（会话状态全部在各自的
/// 工作循环里）
pub struct PageReader {
    handle: PlaybackHandle,
    status: Arc<StatusPublisher>,
    settings_store: Arc<dyn SettingsStorePort>,
}

impl PageReader {
    /// 按配置组装默认链路：espeak 引擎 + JSON 文件参数存储
    pub async fn spawn(
        document: Arc<dyn DocumentPort>,
        config: AppConfig,
    ) -> Result<Self, PlaybackError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let engine = EspeakEngine::new(config.engine.command.clone(), event_tx)
            .await
            .map_err(|e| PlaybackError::Engine(e.to_string()))?;
        let settings_store: Arc<dyn SettingsStorePort> =
            Arc::new(JsonSettingsStore::new(config.storage.settings_path.clone()));

        Ok(Self::with_engine(
            document,
            Arc::new(engine),
            event_rx,
            settings_store,
            config,
        ))
    }

    /// 用外部提供的引擎与存储组装（测试或非 espeak 宿主）
    ///
    /// `engine_events` 必须是 `engine` 回传事件所用通道的接收端
    pub fn with_engine(
        document: Arc<dyn DocumentPort>,
        engine: Arc<dyn SpeechEnginePort>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        settings_store: Arc<dyn SettingsStorePort>,
        config: AppConfig,
    ) -> Self {
        let status = StatusPublisher::default().arc();

        let controller = PlaybackController::new(
            document,
            engine,
            settings_store.clone(),
            status.clone(),
            config.extraction,
            config.chunking,
        );

        let (worker, handle) = PlaybackWorker::new(controller, engine_events);
        tokio::spawn(worker.run());

        Self {
            handle,
            status,
            settings_store,
        }
    }

    /// 播放控制句柄
    pub fn playback(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    /// 订阅状态通知（设置界面、页面控件）
    pub fn subscribe_status(&self) -> broadcast::Receiver<StatusUpdate> {
        self.status.subscribe()
    }

    /// 最近一条状态，供晚到的界面查询
    pub fn last_status(&self) -> Option<StatusUpdate> {
        self.status.last_status()
    }

    /// 参数存储（设置界面读写用；播放只在会话开始时取快照）
    pub fn settings_store(&self) -> Arc<dyn SettingsStorePort> {
        self.settings_store.clone()
    }
}
