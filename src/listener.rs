//! 呼叫状态监听 - 观察者接口与同步分发总线

use std::sync::Arc;
use tracing::{debug, info};

use crate::call::{Call, CallState};

/// 呼叫状态观察者
///
/// 所有回调都有空实现，观察者只覆盖关心的事件。
pub trait CallsManagerListener: Send + Sync {
    /// 名称（用于日志）
    fn name(&self) -> &str;

    fn on_call_added(&self, _call: &Call) {}

    fn on_call_removed(&self, _call: &Call) {}

    fn on_call_state_changed(&self, _call: &Call, _old_state: CallState, _new_state: CallState) {}
}

/// 呼叫事件总线 - 按注册顺序同步调用每个观察者
pub struct CallEventBus {
    listeners: Vec<Arc<dyn CallsManagerListener>>,
}

impl CallEventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// 注册观察者
    pub fn register(&mut self, listener: Arc<dyn CallsManagerListener>) {
        info!(listener = listener.name(), "Registering call listener");
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_names(&self) -> Vec<&str> {
        self.listeners.iter().map(|l| l.name()).collect()
    }

    pub fn call_added(&self, call: &Call) {
        for listener in &self.listeners {
            listener.on_call_added(call);
        }
    }

    pub fn call_removed(&self, call: &Call) {
        for listener in &self.listeners {
            listener.on_call_removed(call);
        }
    }

    /// 分发状态变化
    pub fn call_state_changed(&self, call: &Call, old_state: CallState, new_state: CallState) {
        debug!(
            call = %call,
            old = %old_state,
            new = %new_state,
            listeners = self.listeners.len(),
            "Dispatching call state change"
        );
        for listener in &self.listeners {
            listener.on_call_state_changed(call, old_state, new_state);
        }
    }
}

impl Default for CallEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录收到事件的观察者
    struct RecordingListener {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl CallsManagerListener for RecordingListener {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_call_added(&self, _call: &Call) {
            self.log.lock().unwrap().push(format!("{}:added", self.name));
        }

        fn on_call_state_changed(&self, _call: &Call, old: CallState, new: CallState) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}->{}", self.name, old, new));
        }
    }

    /// 只关心新增呼叫，其余回调用默认实现
    struct QuietListener;

    impl CallsManagerListener for QuietListener {
        fn name(&self) -> &str {
            "quiet"
        }
    }

    #[test]
    fn test_register() {
        let mut bus = CallEventBus::new();
        bus.register(Arc::new(QuietListener));
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.listener_names(), vec!["quiet"]);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = CallEventBus::new();
        for name in ["a", "b"] {
            bus.register(Arc::new(RecordingListener {
                name: name.to_string(),
                log: log.clone(),
            }));
        }
        bus.register(Arc::new(QuietListener));

        let call = Call::new("tel:555");
        bus.call_added(&call);
        bus.call_state_changed(&call, CallState::Ringing, CallState::Disconnected);
        bus.call_removed(&call);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "a:added",
                "b:added",
                "a:RINGING->DISCONNECTED",
                "b:RINGING->DISCONNECTED",
            ]
        );
    }
}
