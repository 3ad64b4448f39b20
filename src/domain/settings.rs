//! 朗读参数
//!
//! 一次朗读会话的不可变参数快照

use serde::{Deserialize, Serialize};

fn default_rate() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

fn default_volume() -> f32 {
    1.0
}

/// 朗读参数
///
/// 字段缺失或非法时回退到默认值，而不是报错
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSettings {
    /// 音色索引（超出可用音色范围时由调用方钳制）
    #[serde(default)]
    pub voice_index: usize,

    /// 语速倍率（1.0 为正常语速）
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// 音调（0.0-2.0，1.0 为正常音调）
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// 音量（0.0-1.0）
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            voice_index: 0,
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
        }
    }
}

impl ReadingSettings {
    /// 清洗参数
    ///
    /// 非有限值回退默认，数值钳制到引擎安全范围：
    /// rate [0.1, 10.0]，pitch [0.0, 2.0]，volume [0.0, 1.0]
    pub fn sanitized(mut self) -> Self {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            self.rate = default_rate();
        }
        if !self.pitch.is_finite() || self.pitch < 0.0 {
            self.pitch = default_pitch();
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            self.volume = default_volume();
        }

        self.rate = self.rate.clamp(0.1, 10.0);
        self.pitch = self.pitch.clamp(0.0, 2.0);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}
