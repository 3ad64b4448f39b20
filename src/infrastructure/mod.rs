//! 基础设施层
//!
//! - adapters: 文档与语音引擎适配器
//! - memory: 内存参数存储
//! - persistence: JSON 文件参数存储
//! - events: 状态广播
//! - worker: 播放工作循环

pub mod adapters;
pub mod events;
pub mod memory;
pub mod persistence;
pub mod worker;
