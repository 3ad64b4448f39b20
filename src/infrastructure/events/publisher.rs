//! Status Publisher Implementation
//!
//! 把控制器的状态通知广播给任意数量的监听者（设置界面、页面控件等），
//! 同时保留最近一条状态，供晚到的监听者查询

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::application::ports::{StatusSinkPort, StatusUpdate};

/// 状态发布器
pub struct StatusPublisher {
    channel: broadcast::Sender<StatusUpdate>,
    last: Mutex<Option<StatusUpdate>>,
}

impl StatusPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            channel: tx,
            last: Mutex::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅后续状态
    pub fn subscribe(&self) -> broadcast::Receiver<StatusUpdate> {
        self.channel.subscribe()
    }

    /// 最近一条状态（尚未发布过任何状态时为 None）
    pub fn last_status(&self) -> Option<StatusUpdate> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StatusSinkPort for StatusPublisher {
    fn report(&self, update: StatusUpdate) {
        if let Ok(mut guard) = self.last.lock() {
            *guard = Some(update.clone());
        }

        if let Err(e) = self.channel.send(update) {
            tracing::debug!(error = %e, "No status subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_updates() {
        let publisher = StatusPublisher::new(16);
        let mut rx = publisher.subscribe();

        publisher.report(StatusUpdate::new(true, "Reading page content (2 chunks)"));

        let update = rx.recv().await.unwrap();
        assert!(update.is_reading);
        assert_eq!(update.message, "Reading page content (2 chunks)");
    }

    #[test]
    fn test_report_without_subscribers_is_harmless() {
        let publisher = StatusPublisher::new(16);
        publisher.report(StatusUpdate::new(false, "Reading stopped"));
    }

    #[test]
    fn test_last_status_retained_for_late_listeners() {
        let publisher = StatusPublisher::new(16);
        assert!(publisher.last_status().is_none());

        publisher.report(StatusUpdate::new(false, "Reading stopped"));

        let last = publisher.last_status().unwrap();
        assert_eq!(last.message, "Reading stopped");
    }
}
