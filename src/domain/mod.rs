//! 领域层
//!
//! 纯逻辑，不依赖任何基础设施：
//! - chunker: 句子切分与分块
//! - document: 文档片段模型与选择器
//! - settings: 朗读参数

pub mod chunker;
pub mod document;
pub mod settings;
