//! 后台工作循环

mod playback_worker;

pub use playback_worker::{PlaybackCommand, PlaybackHandle, PlaybackWorker};
