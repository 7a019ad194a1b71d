//! 广播接收器 - 处理用户在通知上的操作
//!
//! 回拨和短信会先清除未接来电，再把要执行的动作交还宿主。

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::intent::{IntentAction, PendingIntent};
use crate::notifier::MissedCallNotifier;
use crate::uri::Uri;

/// 宿主需要执行的动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "uri", rename_all = "snake_case")]
pub enum HostEffect {
    /// 打开通话记录
    OpenCallLog,
    /// 已清除，无需其他动作
    Cleared,
    /// 拨打电话
    Dial(Uri),
    /// 打开短信编辑界面
    ComposeSms(Uri),
}

/// 广播接收器
pub struct BroadcastReceiver {
    notifier: Arc<MissedCallNotifier>,
}

impl BroadcastReceiver {
    pub fn new(notifier: Arc<MissedCallNotifier>) -> Self {
        Self { notifier }
    }

    /// 处理投递的动作描述符
    pub fn on_receive(&self, intent: &PendingIntent) -> Result<HostEffect> {
        info!(action = %intent.action, "Received notification action");

        match intent.action {
            IntentAction::ViewCallLog => Ok(HostEffect::OpenCallLog),
            IntentAction::ClearMissedCalls => {
                self.notifier.clear_missed_calls();
                Ok(HostEffect::Cleared)
            }
            IntentAction::CallBackFromNotification => {
                let uri = Self::require_data(intent)?;
                self.notifier.clear_missed_calls();
                Ok(HostEffect::Dial(uri))
            }
            IntentAction::SendSmsFromNotification => {
                let uri = Self::require_data(intent)?;
                self.notifier.clear_missed_calls();
                Ok(HostEffect::ComposeSms(uri))
            }
        }
    }

    /// 处理原始动作名和 URI（CLI 使用）
    pub fn on_receive_action(&self, action: &str, data: Option<&str>) -> Result<HostEffect> {
        let action: IntentAction = action.parse()?;
        let intent = PendingIntent::broadcast(action, data.map(Uri::parse));
        self.on_receive(&intent)
    }

    fn require_data(intent: &PendingIntent) -> Result<Uri> {
        intent
            .data
            .clone()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| anyhow!("{} requires a handle URI", intent.action))
    }
}
