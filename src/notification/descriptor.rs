//! 通知描述符 - 交给宿主通知服务渲染的对象

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::call::Bitmap;
use crate::intent::PendingIntent;

/// 小图标资源名
pub mod icon {
    pub const STAT_NOTIFY_MISSED_CALL: &str = "stat_notify_missed_call";
    pub const STAT_SYS_PHONE_CALL: &str = "stat_sys_phone_call";
    pub const IC_TEXT: &str = "ic_text_holo_dark";
}

/// 通知按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub icon: String,
    pub title: String,
    pub intent: PendingIntent,
}

impl NotificationAction {
    pub fn new(icon: impl Into<String>, title: impl Into<String>, intent: PendingIntent) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            intent,
        }
    }
}

/// 通知描述符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub small_icon: String,
    /// 通知时间（来电创建时间）
    pub when: DateTime<Utc>,
    pub title: String,
    pub text: String,
    /// 点击通知
    pub content_intent: PendingIntent,
    /// 滑掉通知
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_intent: Option<PendingIntent>,
    /// 点击后自动消失
    #[serde(default)]
    pub auto_cancel: bool,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<Bitmap>,
    /// 闪烁通知灯
    #[serde(default)]
    pub show_lights: bool,
    /// 使用系统默认灯色
    #[serde(default)]
    pub default_lights: bool,
}

impl Notification {
    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::new()
    }

    /// 是否包含指定动作的按钮
    pub fn has_action(&self, action: crate::intent::IntentAction) -> bool {
        self.actions.iter().any(|a| a.intent.action == action)
    }

    /// 配置通知灯
    pub fn configure_lights(&mut self) {
        self.show_lights = true;
        self.default_lights = true;
    }
}

/// 通知构建器
#[derive(Debug, Default)]
pub struct NotificationBuilder {
    small_icon: Option<String>,
    when: Option<DateTime<Utc>>,
    title: Option<String>,
    text: Option<String>,
    content_intent: Option<PendingIntent>,
    delete_intent: Option<PendingIntent>,
    auto_cancel: bool,
    actions: Vec<NotificationAction>,
    large_icon: Option<Bitmap>,
}

impl NotificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn small_icon(mut self, icon: impl Into<String>) -> Self {
        self.small_icon = Some(icon.into());
        self
    }

    pub fn when(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn content_intent(mut self, intent: PendingIntent) -> Self {
        self.content_intent = Some(intent);
        self
    }

    pub fn delete_intent(mut self, intent: PendingIntent) -> Self {
        self.delete_intent = Some(intent);
        self
    }

    pub fn auto_cancel(mut self, auto_cancel: bool) -> Self {
        self.auto_cancel = auto_cancel;
        self
    }

    /// 追加按钮
    pub fn action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn large_icon(mut self, bitmap: Bitmap) -> Self {
        self.large_icon = Some(bitmap);
        self
    }

    /// 构建通知
    pub fn build(self) -> Result<Notification, &'static str> {
        let title = self.title.ok_or("title is required")?;
        let content_intent = self.content_intent.ok_or("content_intent is required")?;

        Ok(Notification {
            small_icon: self
                .small_icon
                .unwrap_or_else(|| icon::STAT_NOTIFY_MISSED_CALL.to_string()),
            when: self.when.unwrap_or_else(Utc::now),
            title,
            text: self.text.unwrap_or_default(),
            content_intent,
            delete_intent: self.delete_intent,
            auto_cancel: self.auto_cancel,
            actions: self.actions,
            large_icon: self.large_icon,
            show_lights: false,
            default_lights: false,
        })
    }
}
