//! 内存通知服务 - 测试和嵌入场景使用

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::notification::descriptor::Notification;
use crate::notification::sink::NotificationSink;

/// 通知服务收到的操作
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    Notify { id: i32, notification: Notification },
    Cancel { id: i32 },
}

#[derive(Default)]
struct Inner {
    active: BTreeMap<i32, Notification>,
    history: Vec<SinkOp>,
}

/// 内存通知服务
#[derive(Default)]
pub struct InMemorySink {
    inner: Mutex<Inner>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前显示的通知
    pub fn active(&self, id: i32) -> Option<Notification> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.active.get(&id).cloned())
    }

    /// 当前显示的通知数量
    pub fn active_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.active.len()).unwrap_or(0)
    }

    /// 全部操作记录
    pub fn history(&self) -> Vec<SinkOp> {
        self.inner
            .lock()
            .map(|inner| inner.history.clone())
            .unwrap_or_default()
    }

    /// `notify` 调用次数
    pub fn post_count(&self) -> usize {
        self.history()
            .iter()
            .filter(|op| matches!(op, SinkOp::Notify { .. }))
            .count()
    }
}

impl NotificationSink for InMemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn notify(&self, id: i32, notification: &Notification) -> Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory sink lock poisoned"))?;
        inner.active.insert(id, notification.clone());
        inner.history.push(SinkOp::Notify {
            id,
            notification: notification.clone(),
        });
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory sink lock poisoned"))?;
        inner.active.remove(&id);
        inner.history.push(SinkOp::Cancel { id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentFactory;

    fn sample(title: &str) -> Notification {
        Notification::builder()
            .title(title)
            .content_intent(IntentFactory::new().call_log())
            .build()
            .unwrap()
    }

    #[test]
    fn test_notify_replaces_same_id() {
        let sink = InMemorySink::new();
        sink.notify(1, &sample("first")).unwrap();
        sink.notify(1, &sample("second")).unwrap();

        assert_eq!(sink.active_count(), 1);
        assert_eq!(sink.active(1).unwrap().title, "second");
        assert_eq!(sink.post_count(), 2);
    }

    #[test]
    fn test_cancel_missing_id_is_ok() {
        let sink = InMemorySink::new();
        assert!(sink.cancel(7).is_ok());
        assert_eq!(sink.history(), vec![SinkOp::Cancel { id: 7 }]);
    }
}
