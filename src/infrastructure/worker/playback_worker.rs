//! Playback Worker - 播放命令与引擎事件的泵
//!
//! 单个 tokio 任务独占控制器，select 命令通道和引擎事件通道。
//! 所有状态变更都发生在这一个任务里，utterance 提交因此天然串行。

use tokio::sync::{mpsc, watch};

use crate::application::controller::{PlaybackController, PlaybackProgress};
use crate::application::error::PlaybackError;
use crate::application::ports::EngineEvent;
use crate::domain::settings::ReadingSettings;

/// 播放命令
#[derive(Debug)]
pub enum PlaybackCommand {
    /// 开始朗读（可携带参数覆盖，不带则读取存储的参数）
    Start {
        settings: Option<ReadingSettings>,
    },
    Stop,
    Previous,
    Next,
}

/// 播放句柄
///
/// 嵌入方持有的外观：发命令、查进度
#[derive(Clone)]
pub struct PlaybackHandle {
    commands: mpsc::UnboundedSender<PlaybackCommand>,
    progress: watch::Receiver<PlaybackProgress>,
}

impl PlaybackHandle {
    pub fn start(&self, settings: Option<ReadingSettings>) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Start { settings })
    }

    pub fn stop(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Stop)
    }

    pub fn previous(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Previous)
    }

    pub fn next(&self) -> Result<(), PlaybackError> {
        self.send(PlaybackCommand::Next)
    }

    /// 当前进度快照
    pub fn progress(&self) -> PlaybackProgress {
        *self.progress.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.progress().total > 0
    }

    /// 进度的 watch 订阅（UI 进度条用）
    pub fn progress_watch(&self) -> watch::Receiver<PlaybackProgress> {
        self.progress.clone()
    }

    fn send(&self, command: PlaybackCommand) -> Result<(), PlaybackError> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::WorkerUnavailable("playback worker exited".to_string()))
    }
}

/// 播放工作循环
pub struct PlaybackWorker {
    controller: PlaybackController,
    commands: mpsc::UnboundedReceiver<PlaybackCommand>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    progress: watch::Sender<PlaybackProgress>,
}

impl PlaybackWorker {
    /// 创建工作循环与配套句柄
    ///
    /// `engine_events` 是引擎构造时注入的事件通道的接收端
    pub fn new(
        controller: PlaybackController,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> (Self, PlaybackHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (progress_tx, progress_rx) = watch::channel(PlaybackProgress::default());

        let worker = Self {
            controller,
            commands: command_rx,
            engine_events,
            progress: progress_tx,
        };
        let handle = PlaybackHandle {
            commands: command_tx,
            progress: progress_rx,
        };
        (worker, handle)
    }

    /// 运行直到命令通道或事件通道关闭
    pub async fn run(mut self) {
        tracing::info!("Playback worker started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                event = self.engine_events.recv() => match event {
                    Some(event) => self.controller.handle_engine_event(event),
                    None => break,
                },
            }

            self.progress.send_replace(self.controller.progress());
        }

        tracing::info!("Playback worker stopped");
    }

    async fn handle_command(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Start { settings } => {
                if let Err(e) = self.controller.start(settings).await {
                    tracing::warn!(error = %e, "Start command failed");
                }
            }
            PlaybackCommand::Stop => self.controller.stop(),
            PlaybackCommand::Previous => self.controller.previous(),
            PlaybackCommand::Next => self.controller.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        SpeechEnginePort, SpeechError, UtteranceRequest, VoiceInfo,
    };
    use crate::config::{ChunkingConfig, ExtractionConfig};
    use crate::domain::document::ContentNode;
    use crate::infrastructure::adapters::TreeDocument;
    use crate::infrastructure::events::StatusPublisher;
    use crate::infrastructure::memory::InMemorySettingsStore;
    use std::sync::Arc;
    use std::time::Duration;

    /// 提交即回报完成的引擎，驱动整条链路跑到底
    struct AutoCompleteEngine {
        events: mpsc::UnboundedSender<EngineEvent>,
        complete: bool,
    }

    impl SpeechEnginePort for AutoCompleteEngine {
        fn submit(&self, request: UtteranceRequest) -> Result<(), SpeechError> {
            if self.complete {
                let _ = self.events.send(EngineEvent::Completed {
                    handle: request.handle,
                });
            }
            Ok(())
        }

        fn cancel(&self) {}

        fn list_voices(&self) -> Vec<VoiceInfo> {
            vec![VoiceInfo {
                id: "en".to_string(),
                display_name: "English".to_string(),
            }]
        }
    }

    fn spawn_worker(complete: bool) -> (PlaybackHandle, Arc<StatusPublisher>) {
        let document = Arc::new(TreeDocument::new(
            ContentNode::new("body").with_child(
                ContentNode::new("main").with_text("One thing. Another thing. Last thing."),
            ),
        ));
        let publisher = StatusPublisher::new(16).arc();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let engine = Arc::new(AutoCompleteEngine {
            events: event_tx,
            complete,
        });

        let controller = PlaybackController::new(
            document,
            engine,
            Arc::new(InMemorySettingsStore::new()),
            publisher.clone(),
            ExtractionConfig::default(),
            ChunkingConfig {
                max_chunk_chars: 12,
            },
        );

        let (worker, handle) = PlaybackWorker::new(controller, event_rx);
        tokio::spawn(worker.run());
        (handle, publisher)
    }

    async fn wait_for_total(
        watch: &mut watch::Receiver<PlaybackProgress>,
        total: usize,
    ) -> PlaybackProgress {
        tokio::time::timeout(Duration::from_secs(5), async {
            watch
                .wait_for(|p| p.total == total)
                .await
                .expect("worker dropped progress channel")
                .clone()
        })
        .await
        .expect("timed out waiting for progress")
    }

    #[tokio::test]
    async fn test_session_runs_to_completion_over_channels() {
        let (handle, publisher) = spawn_worker(true);
        let mut status_rx = publisher.subscribe();
        let mut progress = handle.progress_watch();

        handle.start(None).unwrap();

        // broadcast 不丢消息，以状态流驱动断言（watch 只保留最新值）
        let mut messages = Vec::new();
        loop {
            let update = tokio::time::timeout(Duration::from_secs(5), status_rx.recv())
                .await
                .expect("timed out waiting for status")
                .expect("status channel closed");
            let done = update.message == "Reading stopped";
            messages.push(update.message);
            if done {
                break;
            }
        }
        assert!(messages.contains(&"Reading page content (3 chunks)".to_string()));

        wait_for_total(&mut progress, 0).await;
        assert!(!handle.is_active());
        assert_eq!(handle.progress(), PlaybackProgress::default());
    }

    #[tokio::test]
    async fn test_stop_command_ends_session() {
        let (handle, _publisher) = spawn_worker(false);
        let mut progress = handle.progress_watch();

        handle.start(None).unwrap();
        let active = wait_for_total(&mut progress, 3).await;
        assert_eq!(active.current, 1);

        handle.stop().unwrap();
        wait_for_total(&mut progress, 0).await;
        assert!(!handle.is_active());
    }

    #[tokio::test]
    async fn test_navigation_commands_move_the_index() {
        let (handle, _publisher) = spawn_worker(false);
        let mut progress = handle.progress_watch();

        handle.start(None).unwrap();
        wait_for_total(&mut progress, 3).await;

        handle.next().unwrap();
        let p = tokio::time::timeout(Duration::from_secs(5), async {
            progress.wait_for(|p| p.current == 2).await.unwrap().clone()
        })
        .await
        .expect("timed out waiting for next");
        assert_eq!(p.total, 3);

        handle.previous().unwrap();
        tokio::time::timeout(Duration::from_secs(5), async {
            progress.wait_for(|p| p.current == 1).await.unwrap();
        })
        .await
        .expect("timed out waiting for previous");
    }
}
