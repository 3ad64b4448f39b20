//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod document;
mod settings_store;
mod speech_engine;
mod status_sink;

pub use document::DocumentPort;
pub use settings_store::{SettingsStorePort, StoreError};
pub use speech_engine::{
    EngineEvent, SpeechEnginePort, SpeechError, UtteranceHandle, UtteranceRequest, VoiceInfo,
};
pub use status_sink::{StatusSinkPort, StatusUpdate};
