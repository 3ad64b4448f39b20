//! 应用层
//!
//! 出站端口、正文提取、播放控制状态机与统一错误类型

pub mod controller;
pub mod error;
pub mod extractor;
pub mod ports;

pub use controller::{PlaybackController, PlaybackProgress};
pub use error::{ExtractError, PlaybackError};
