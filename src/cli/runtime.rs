//! CLI 运行环境 - 用文件适配器模拟宿主服务并组装通知器

use std::sync::Arc;

use crate::call_log::JsonlCallLog;
use crate::config::NotifierConfig;
use crate::notification::sinks::{FileSink, LogSink};
use crate::notification::NotificationDispatcher;
use crate::notifier::MissedCallNotifier;
use crate::receiver::BroadcastReceiver;

/// 组装好的宿主环境
pub struct Runtime {
    pub config: NotifierConfig,
    pub call_log: Arc<JsonlCallLog>,
    pub file_sink: Arc<FileSink>,
    pub notifier: Arc<MissedCallNotifier>,
}

impl Runtime {
    pub fn new(config: NotifierConfig, dry_run: bool) -> Self {
        let call_log = Arc::new(JsonlCallLog::new(config.call_log_path()));
        let file_sink = Arc::new(FileSink::new(config.notifications_path()));

        let mut dispatcher = NotificationDispatcher::new().with_dry_run(dry_run);
        dispatcher.register_sink(Arc::new(LogSink::new()));
        dispatcher.register_sink(file_sink.clone());

        let notifier = Arc::new(MissedCallNotifier::from_config(
            &config,
            Arc::new(dispatcher),
            call_log.clone(),
        ));

        Self {
            config,
            call_log,
            file_sink,
            notifier,
        }
    }

    pub fn receiver(&self) -> BroadcastReceiver {
        BroadcastReceiver::new(self.notifier.clone())
    }
}
