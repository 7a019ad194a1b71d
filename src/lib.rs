//! Missed Call Notifier - 监听呼叫状态，汇总未接来电并显示通知

pub mod bidi;
pub mod call;
pub mod call_log;
pub mod cli;
pub mod config;
pub mod file_lock;
pub mod intent;
pub mod listener;
pub mod notification;
pub mod notifier;
pub mod receiver;
pub mod strings;
pub mod uri;

pub use bidi::BidiFormatter;
pub use call::{Bitmap, Call, CallState, DisconnectCause, Photo};
pub use call_log::{CallLogEntry, CallLogFilter, CallLogStore, CallLogUpdate, CallType, InMemoryCallLog, JsonlCallLog};
pub use config::NotifierConfig;
pub use intent::{IntentAction, IntentFactory, IntentTarget, PendingIntent};
pub use listener::{CallEventBus, CallsManagerListener};
pub use notification::{Notification, NotificationAction, NotificationDispatcher, NotificationSink};
pub use notification::sinks::{FileSink, InMemorySink, LogSink};
pub use notifier::{MissedCallNotifier, MISSED_CALL_NOTIFICATION_ID};
pub use receiver::{BroadcastReceiver, HostEffect};
pub use strings::Strings;
pub use uri::Uri;
