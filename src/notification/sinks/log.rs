//! 日志通知服务 - 只把通知写进 tracing 日志

use anyhow::Result;
use tracing::info;

use crate::notification::descriptor::Notification;
use crate::notification::sink::NotificationSink;

/// 日志通知服务
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, id: i32, notification: &Notification) -> Result<()> {
        let actions: Vec<&str> = notification
            .actions
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        info!(
            sink = "log",
            id,
            title = %notification.title,
            actions = ?actions,
            large_icon = notification.large_icon.is_some(),
            "Notification posted"
        );
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        info!(sink = "log", id, "Notification cancelled");
        Ok(())
    }
}
