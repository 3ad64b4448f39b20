//! 配置管理

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, load_config_from_str, ConfigError};
pub use types::{AppConfig, ChunkingConfig, EngineConfig, ExtractionConfig, StorageConfig};
