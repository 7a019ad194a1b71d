//! 呼叫记录 - 由外部呼叫管理组件提供的只读视图

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::uri::Uri;

/// 呼叫状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    New,
    Connecting,
    PreDialWait,
    Dialing,
    Ringing,
    Active,
    OnHold,
    Disconnected,
    Aborted,
}

impl CallState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallState::New => "NEW",
            CallState::Connecting => "CONNECTING",
            CallState::PreDialWait => "PRE_DIAL_WAIT",
            CallState::Dialing => "DIALING",
            CallState::Ringing => "RINGING",
            CallState::Active => "ACTIVE",
            CallState::OnHold => "ON_HOLD",
            CallState::Disconnected => "DISCONNECTED",
            CallState::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 挂断原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectCause {
    #[default]
    NotDisconnected,
    /// 正常挂断（对端）
    Normal,
    /// 本端挂断
    Local,
    Busy,
    /// 来电未接
    IncomingMissed,
    /// 来电被拒
    IncomingRejected,
    Error,
    /// 宿主平台的其他原因码
    Other(i32),
}

/// 位图（已解码的像素数据，由宿主提供）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }
}

/// 联系人照片
///
/// 只有 `Bitmap` 能直接作为通知大图标，`Vector` 需要宿主渲染。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Photo {
    Bitmap { bitmap: Bitmap },
    Vector { resource: String },
}

impl Photo {
    pub fn as_bitmap(&self) -> Option<&Bitmap> {
        match self {
            Photo::Bitmap { bitmap } => Some(bitmap),
            Photo::Vector { .. } => None,
        }
    }
}

/// 呼叫记录（外部只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// 呼叫句柄，如 `tel:555-1234`
    #[serde(default)]
    pub handle: Uri,
    /// 联系人显示名
    #[serde(default)]
    pub name: Option<String>,
    /// 呼叫创建时间
    #[serde(default = "Utc::now")]
    pub creation_time: DateTime<Utc>,
    #[serde(default)]
    pub disconnect_cause: DisconnectCause,
    /// 预先计算的缩略图
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_icon: Option<Bitmap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

impl Call {
    pub fn new(handle: impl Into<Uri>) -> Self {
        Self {
            handle: handle.into(),
            name: None,
            creation_time: Utc::now(),
            disconnect_cause: DisconnectCause::NotDisconnected,
            photo_icon: None,
            photo: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_creation_time(mut self, time: DateTime<Utc>) -> Self {
        self.creation_time = time;
        self
    }

    pub fn with_disconnect_cause(mut self, cause: DisconnectCause) -> Self {
        self.disconnect_cause = cause;
        self
    }

    pub fn with_photo_icon(mut self, icon: Bitmap) -> Self {
        self.photo_icon = Some(icon);
        self
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// 大图标：优先缩略图，其次位图照片
    pub fn large_icon(&self) -> Option<&Bitmap> {
        self.photo_icon
            .as_ref()
            .or_else(|| self.photo.as_ref().and_then(Photo::as_bitmap))
    }
}

impl fmt::Display for Call {
    // 日志输出，句柄脱敏
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Call handle: {}, cause: {:?}, created: {}]",
            self.handle.redacted(),
            self.disconnect_cause,
            self.creation_time.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_icon_prefers_thumbnail() {
        let thumb = Bitmap::new(48, 48, vec![1]);
        let full = Bitmap::new(256, 256, vec![2]);
        let call = Call::new("tel:1")
            .with_photo_icon(thumb.clone())
            .with_photo(Photo::Bitmap { bitmap: full });
        assert_eq!(call.large_icon(), Some(&thumb));
    }

    #[test]
    fn test_large_icon_falls_back_to_bitmap_photo() {
        let full = Bitmap::new(256, 256, vec![2]);
        let call = Call::new("tel:1").with_photo(Photo::Bitmap { bitmap: full.clone() });
        assert_eq!(call.large_icon(), Some(&full));
    }

    #[test]
    fn test_large_icon_ignores_vector_photo() {
        let call = Call::new("tel:1").with_photo(Photo::Vector {
            resource: "ic_contact_picture".to_string(),
        });
        assert!(call.large_icon().is_none());
    }

    #[test]
    fn test_call_deserialize_minimal() {
        let json = r#"{"handle":"tel:555-1234","name":"Alice","disconnect_cause":"incoming_missed"}"#;
        let call: Call = serde_json::from_str(json).unwrap();
        assert_eq!(call.handle.scheme_specific_part(), "555-1234");
        assert_eq!(call.name.as_deref(), Some("Alice"));
        assert_eq!(call.disconnect_cause, DisconnectCause::IncomingMissed);
        assert!(call.photo.is_none());
    }

    #[test]
    fn test_call_display_redacts_handle() {
        let call = Call::new("tel:555-1234");
        let shown = call.to_string();
        assert!(shown.contains("tel:******34"));
        assert!(!shown.contains("555-1234"));
    }

    #[test]
    fn test_call_state_display() {
        assert_eq!(CallState::Ringing.to_string(), "RINGING");
        assert_eq!(CallState::Disconnected.to_string(), "DISCONNECTED");
    }
}
