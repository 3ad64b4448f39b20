//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::chunker::DEFAULT_MAX_CHUNK_CHARS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 正文提取配置
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// 分块配置
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// 语音引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,
}

/// 正文提取配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// 正文区域选择器，按优先级探测，第一个命中的生效
    #[serde(default = "default_content_selectors")]
    pub content_selectors: Vec<String>,

    /// 非正文选择器，匹配的子树整体剔除
    #[serde(default = "default_excluded_selectors")]
    pub excluded_selectors: Vec<String>,
}

fn default_content_selectors() -> Vec<String> {
    [
        "main",
        "article",
        ".content",
        ".main-content",
        "#content",
        "#main",
        ".post-content",
        ".entry-content",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_excluded_selectors() -> Vec<String> {
    [
        "nav",
        "header",
        "footer",
        ".nav",
        ".navigation",
        ".sidebar",
        ".advertisement",
        ".ads",
        ".ad",
        ".menu",
        ".footer",
        ".header",
        "script",
        "style",
        ".social-share",
        ".comments",
        ".related-posts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_selectors: default_content_selectors(),
            excluded_selectors: default_excluded_selectors(),
        }
    }
}

/// 分块配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// 最大块字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// 语音引擎配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// espeak 可执行文件名；不设置时自动探测 espeak / espeak-ng
    #[serde(default)]
    pub command: Option<String>,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 朗读参数文件路径
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("data/settings.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}
