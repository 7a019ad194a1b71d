//! 通知分发器 - 把同一条通知投递到多个宿主通知服务

use super::descriptor::Notification;
use super::sink::NotificationSink;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// 通知分发器，本身也是一个 `NotificationSink`
pub struct NotificationDispatcher {
    /// 所有注册的通知服务
    sinks: Vec<Arc<dyn NotificationSink>>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl NotificationDispatcher {
    /// 创建新的分发器
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            dry_run: false,
        }
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 注册通知服务
    pub fn register_sink(&mut self, sink: Arc<dyn NotificationSink>) {
        info!(sink = sink.name(), "Registering notification sink");
        self.sinks.push(sink);
    }

    /// 获取已注册的数量
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// 获取已注册的名称
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NotificationDispatcher {
    fn name(&self) -> &str {
        "dispatcher"
    }

    /// 单个服务失败只记录日志，不影响其余服务
    fn notify(&self, id: i32, notification: &Notification) -> Result<()> {
        for sink in &self.sinks {
            if self.dry_run {
                eprintln!("[DRY-RUN] Would post notification {} to sink: {}", id, sink.name());
                continue;
            }

            if let Err(e) = sink.notify(id, notification) {
                warn!(sink = sink.name(), id, error = %e, "Sink notify failed");
            }
        }
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        for sink in &self.sinks {
            if self.dry_run {
                eprintln!("[DRY-RUN] Would cancel notification {} on sink: {}", id, sink.name());
                continue;
            }

            if let Err(e) = sink.cancel(id) {
                warn!(sink = sink.name(), id, error = %e, "Sink cancel failed");
            }
        }
        Ok(())
    }
}
