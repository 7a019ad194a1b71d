//! 具体通知服务实现

pub mod file;
pub mod log;
pub mod memory;

pub use file::{FileSink, NotificationRecord, RecordOp};
pub use self::log::LogSink;
pub use memory::{InMemorySink, SinkOp};
