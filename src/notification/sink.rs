//! 通知服务 trait 定义

use anyhow::Result;

use super::descriptor::Notification;

/// 宿主通知服务
///
/// 同一 id 再次 `notify` 会替换已显示的通知。
pub trait NotificationSink: Send + Sync {
    /// 名称（用于日志）
    fn name(&self) -> &str;

    /// 显示或替换通知
    fn notify(&self, id: i32, notification: &Notification) -> Result<()>;

    /// 撤回通知，id 不存在时不报错
    fn cancel(&self, id: i32) -> Result<()>;
}
