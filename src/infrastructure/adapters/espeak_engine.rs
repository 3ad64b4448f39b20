//! eSpeak Engine Implementation
//!
//! 每个 utterance 起一个 espeak/espeak-ng 子进程直接播放，
//! 进程退出即完成；cancel 通过 oneshot 信号杀掉子进程，被取消的
//! 提交不回传任何事件。

use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};

use crate::application::ports::{
    EngineEvent, SpeechEnginePort, SpeechError, UtteranceRequest, VoiceInfo,
};

/// espeak 默认语速（words per minute），倍率 1.0 对应此值
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// eSpeak 语音引擎
pub struct EspeakEngine {
    command: String,
    events: mpsc::UnboundedSender<EngineEvent>,
    voices: Vec<VoiceInfo>,
    /// 当前播放的取消信号；submit 前 controller 必定已 cancel，
    /// 这里替换旧值只是兜底
    cancel_slot: Mutex<Option<oneshot::Sender<()>>>,
}

impl EspeakEngine {
    /// 探测 espeak 可用性并加载音色列表
    ///
    /// `command` 为空时依次尝试 `espeak`、`espeak-ng`
    pub async fn new(
        command: Option<String>,
        events: mpsc::UnboundedSender<EngineEvent>,
    ) -> Result<Self, SpeechError> {
        let command = match command {
            Some(cmd) if !cmd.is_empty() => {
                if !Self::probe(&cmd).await {
                    return Err(SpeechError::Unavailable(format!(
                        "{} not found, please install espeak or espeak-ng",
                        cmd
                    )));
                }
                cmd
            }
            _ => Self::detect_command().await.ok_or_else(|| {
                SpeechError::Unavailable(
                    "espeak not found, please install espeak or espeak-ng".to_string(),
                )
            })?,
        };

        let output = Command::new(&command)
            .arg("--voices")
            .output()
            .await
            .map_err(|e| SpeechError::Unavailable(format!("Failed to list voices: {}", e)))?;
        let voices = Self::parse_voice_list(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(command = %command, voices = voices.len(), "eSpeak engine ready");

        Ok(Self {
            command,
            events,
            voices,
            cancel_slot: Mutex::new(None),
        })
    }

    async fn probe(command: &str) -> bool {
        Command::new(command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn detect_command() -> Option<String> {
        for candidate in ["espeak", "espeak-ng"] {
            if Self::probe(candidate).await {
                return Some(candidate.to_string());
            }
        }
        None
    }

    /// 解析 `espeak --voices` 输出
    ///
    /// 行格式: Pty Language Age/Gender VoiceName File Other
    fn parse_voice_list(output: &str) -> Vec<VoiceInfo> {
        let mut voices = Vec::new();

        for line in output.lines().skip(1) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 || fields[0].parse::<u32>().is_err() {
                continue;
            }

            let language = fields[1];
            let voice_name = fields[3];
            voices.push(VoiceInfo {
                id: voice_name.to_string(),
                display_name: format!("{} ({})", voice_name, language),
            });
        }

        voices
    }

    /// 把倍率参数翻译为 espeak 命令行参数
    ///
    /// -s 语速 wpm，-p 音调 0-99，-a 音量 0-200
    fn build_args(request: &UtteranceRequest) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(voice) = &request.voice_id {
            args.push("-v".to_string());
            args.push(voice.clone());
        }

        let wpm = (BASE_WORDS_PER_MINUTE * request.rate).round().clamp(80.0, 450.0) as u32;
        args.push("-s".to_string());
        args.push(wpm.to_string());

        let pitch = (request.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
        args.push("-p".to_string());
        args.push(pitch.to_string());

        let amplitude = (request.volume * 200.0).round().clamp(0.0, 200.0) as u32;
        args.push("-a".to_string());
        args.push(amplitude.to_string());

        // 文本可能以 '-' 开头，必须用 "--" 结束选项解析
        args.push("--".to_string());
        args.push(request.text.clone());
        args
    }
}

impl SpeechEnginePort for EspeakEngine {
    fn submit(&self, request: UtteranceRequest) -> Result<(), SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::InvalidInput("Empty text input".to_string()));
        }

        let args = Self::build_args(&request);
        tracing::debug!(command = %self.command, chunk_index = request.handle.chunk_index, "Spawning espeak");

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Unavailable(format!("Failed to spawn espeak: {}", e)))?;

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        if let Ok(mut slot) = self.cancel_slot.lock() {
            // 旧 sender 被替换即丢弃，对应子进程的等待任务会走取消分支
            *slot = Some(cancel_tx);
        }

        let events = self.events.clone();
        let handle = request.handle;
        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    let event = match status {
                        Ok(s) if s.success() => EngineEvent::Completed { handle },
                        Ok(s) => EngineEvent::Failed {
                            handle,
                            error: format!("espeak exited with {}", s),
                        },
                        Err(e) => EngineEvent::Failed {
                            handle,
                            error: format!("Failed to wait for espeak: {}", e),
                        },
                    };
                    let _ = events.send(event);
                }
                _ = cancel_rx => {
                    // 取消：杀掉子进程并回收，不回传事件
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    tracing::debug!(chunk_index = handle.chunk_index, "Utterance cancelled");
                }
            }
        });

        Ok(())
    }

    fn cancel(&self) {
        if let Ok(mut slot) = self.cancel_slot.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(());
            }
        }
    }

    fn list_voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }
}
