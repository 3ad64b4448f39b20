//! Lector - 页面朗读核心
//!
//! 把页面文档变成顺序播放的语音：提取正文、按句分块、逐块驱动
//! 语音引擎，支持 stop/previous/next 与状态上报。进程内组件，
//! 没有网络、CLI 或 UI 表面。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - chunker: 句子切分与贪心分块
//! - document: 文档片段模型与结构选择器
//! - settings: 朗读参数
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Document, SpeechEngine, SettingsStore, StatusSink）
//! - Extractor: 正文提取
//! - PlaybackController: 顺序朗读状态机
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: TreeDocument, EspeakEngine
//! - Memory / Persistence: 参数存储（内存 / JSON 文件）
//! - Events: 状态广播
//! - Worker: 播放工作循环
//!
//! 组装 (reader/):
//! - PageReader: 按配置接线并启动工作循环

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod reader;

pub use application::{PlaybackController, PlaybackError, PlaybackProgress};
pub use config::{load_config, AppConfig};
pub use domain::settings::ReadingSettings;
pub use infrastructure::worker::{PlaybackHandle, PlaybackWorker};
pub use reader::PageReader;
