//! Status Sink Port - 状态通知抽象
//!
//! 单向 fire-and-forget 通知，控制器不关心是否有监听者

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 播放状态通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// 当前是否在朗读
    pub is_reading: bool,
    /// 面向用户的状态文案
    pub message: String,
    /// 发出时刻
    pub timestamp: DateTime<Utc>,
}

impl StatusUpdate {
    pub fn new(is_reading: bool, message: impl Into<String>) -> Self {
        Self {
            is_reading,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Status Sink Port
pub trait StatusSinkPort: Send + Sync {
    /// 上报一条状态消息
    fn report(&self, update: StatusUpdate);
}
