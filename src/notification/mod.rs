//! 通知抽象层 - 通知描述符与宿主通知服务
//!
//! # 使用示例
//! ```ignore
//! use missed_call_notifier::notification::{NotificationDispatcher, sinks::{LogSink, FileSink}};
//!
//! let mut dispatcher = NotificationDispatcher::new();
//! dispatcher.register_sink(Arc::new(LogSink::new()));
//! dispatcher.register_sink(Arc::new(FileSink::new("notifications.jsonl")));
//! ```

pub mod descriptor;
pub mod dispatcher;
pub mod sink;
pub mod sinks;

pub use descriptor::{Notification, NotificationAction, NotificationBuilder};
pub use dispatcher::NotificationDispatcher;
pub use sink::NotificationSink;
