//! 延迟动作描述符 - 通知被点击/滑掉/按下按钮时由宿主投递

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::uri::{Uri, SCHEME_SMSTO};

/// 通话记录列表的 MIME 类型
pub const CALL_LOG_CONTENT_TYPE: &str = "vnd.android.cursor.dir/calls";

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    /// 打开通话记录
    ViewCallLog,
    /// 清除未接来电
    ClearMissedCalls,
    /// 从通知回拨
    CallBackFromNotification,
    /// 从通知发短信
    SendSmsFromNotification,
}

impl IntentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentAction::ViewCallLog => "android.intent.action.VIEW",
            IntentAction::ClearMissedCalls => "com.android.telecomm.ACTION_CLEAR_MISSED_CALLS",
            IntentAction::CallBackFromNotification => {
                "com.android.telecomm.ACTION_CALL_BACK_FROM_NOTIFICATION"
            }
            IntentAction::SendSmsFromNotification => {
                "com.android.telecomm.ACTION_SEND_SMS_FROM_NOTIFICATION"
            }
        }
    }

    pub fn all() -> [IntentAction; 4] {
        [
            IntentAction::ViewCallLog,
            IntentAction::ClearMissedCalls,
            IntentAction::CallBackFromNotification,
            IntentAction::SendSmsFromNotification,
        ]
    }
}

impl fmt::Display for IntentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntentAction {
    type Err = anyhow::Error;

    /// 接受完整动作名，也接受 snake_case 短名（如 `call_back_from_notification`）
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        IntentAction::all()
            .into_iter()
            .find(|a| {
                a.as_str() == s
                    || serde_json::to_value(a)
                        .ok()
                        .and_then(|v| v.as_str().map(|n| n == s))
                        .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("Unknown intent action: {}", s))
    }
}

/// 投递目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTarget {
    /// 启动界面（通话记录）
    Activity,
    /// 发给本组件的广播接收器
    Broadcast,
}

/// 延迟动作描述符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingIntent {
    pub action: IntentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub target: IntentTarget,
}

impl PendingIntent {
    /// 发给广播接收器的描述符
    pub fn broadcast(action: IntentAction, data: Option<Uri>) -> Self {
        Self {
            action,
            data,
            mime_type: None,
            target: IntentTarget::Broadcast,
        }
    }
}

/// 动作描述符工厂 - 纯构造，无副作用
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentFactory;

impl IntentFactory {
    pub fn new() -> Self {
        Self
    }

    /// 点击通知：打开通话记录
    pub fn call_log(&self) -> PendingIntent {
        PendingIntent {
            action: IntentAction::ViewCallLog,
            data: None,
            mime_type: Some(CALL_LOG_CONTENT_TYPE.to_string()),
            target: IntentTarget::Activity,
        }
    }

    /// 滑掉通知：清除未接来电
    pub fn clear_missed_calls(&self) -> PendingIntent {
        PendingIntent::broadcast(IntentAction::ClearMissedCalls, None)
    }

    /// 回拨
    pub fn call_back(&self, handle: &Uri) -> PendingIntent {
        PendingIntent::broadcast(IntentAction::CallBackFromNotification, Some(handle.clone()))
    }

    /// 发短信，数据改写为 `smsto:` URI
    pub fn send_sms(&self, handle: &Uri) -> PendingIntent {
        PendingIntent::broadcast(
            IntentAction::SendSmsFromNotification,
            Some(Uri::from_parts(SCHEME_SMSTO, handle.scheme_specific_part())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_log_intent() {
        let intent = IntentFactory::new().call_log();
        assert_eq!(intent.action, IntentAction::ViewCallLog);
        assert_eq!(intent.target, IntentTarget::Activity);
        assert_eq!(intent.mime_type.as_deref(), Some(CALL_LOG_CONTENT_TYPE));
        assert!(intent.data.is_none());
    }

    #[test]
    fn test_clear_intent_has_no_data() {
        let intent = IntentFactory::new().clear_missed_calls();
        assert_eq!(intent.action, IntentAction::ClearMissedCalls);
        assert_eq!(intent.target, IntentTarget::Broadcast);
        assert!(intent.data.is_none());
    }

    #[test]
    fn test_call_back_keeps_handle() {
        let handle = Uri::tel("555-1234");
        let intent = IntentFactory::new().call_back(&handle);
        assert_eq!(intent.data, Some(handle));
    }

    #[test]
    fn test_send_sms_rewrites_scheme() {
        let intent = IntentFactory::new().send_sms(&Uri::parse("sip:bob@example.com"));
        assert_eq!(intent.data.unwrap().to_string(), "smsto:bob@example.com");
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!(
            "call_back_from_notification".parse::<IntentAction>().unwrap(),
            IntentAction::CallBackFromNotification
        );
        assert_eq!(
            "com.android.telecomm.ACTION_CLEAR_MISSED_CALLS".parse::<IntentAction>().unwrap(),
            IntentAction::ClearMissedCalls
        );
        assert!("reboot".parse::<IntentAction>().is_err());
    }

    #[test]
    fn test_pending_intent_serialization() {
        let intent = IntentFactory::new().send_sms(&Uri::tel("555"));
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["action"], "send_sms_from_notification");
        assert_eq!(json["data"], "smsto:555");
        assert_eq!(json["target"], "broadcast");
        assert!(json.get("mime_type").is_none());
    }
}
