//! 通话记录存储抽象
//!
//! 本组件只需要一次批量更新：把 `new = 1 AND type = missed` 的行改成
//! `new = 0, is_read = 1`。查询和插入供宿主模拟与 CLI 使用。

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlCallLog;
pub use memory::InMemoryCallLog;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 通话类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Voicemail,
}

/// 通话记录行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntry {
    pub id: u64,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub call_type: CallType,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub duration_secs: u64,
    /// 用户尚未在通话记录中看到
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub is_read: bool,
}

impl CallLogEntry {
    /// 新的未接来电行（id 由存储分配）
    pub fn missed(number: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            number: number.into(),
            name: None,
            call_type: CallType::Missed,
            date,
            duration_secs: 0,
            new: true,
            is_read: false,
        }
    }
}

/// 行过滤条件，字段为 `None` 时不参与过滤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallLogFilter {
    pub new: Option<bool>,
    pub call_type: Option<CallType>,
}

impl CallLogFilter {
    /// 全部行
    pub fn all() -> Self {
        Self::default()
    }

    /// `new = 1 AND type = missed`
    pub fn new_missed() -> Self {
        Self {
            new: Some(true),
            call_type: Some(CallType::Missed),
        }
    }

    pub fn matches(&self, entry: &CallLogEntry) -> bool {
        self.new.map_or(true, |new| entry.new == new)
            && self.call_type.map_or(true, |t| entry.call_type == t)
    }
}

/// 要写入的列
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallLogUpdate {
    pub new: Option<bool>,
    pub is_read: Option<bool>,
}

impl CallLogUpdate {
    /// `new = 0, is_read = 1`
    pub fn mark_read() -> Self {
        Self {
            new: Some(false),
            is_read: Some(true),
        }
    }

    pub fn apply(&self, entry: &mut CallLogEntry) {
        if let Some(new) = self.new {
            entry.new = new;
        }
        if let Some(is_read) = self.is_read {
            entry.is_read = is_read;
        }
    }
}

/// 宿主通话记录存储
pub trait CallLogStore: Send + Sync {
    /// 批量更新，返回受影响行数
    fn update(&self, filter: &CallLogFilter, values: &CallLogUpdate) -> Result<usize>;

    /// 查询，按时间倒序
    fn query(&self, filter: &CallLogFilter) -> Result<Vec<CallLogEntry>>;

    /// 插入一行，返回分配的 id
    fn insert(&self, entry: CallLogEntry) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(call_type: CallType, new: bool) -> CallLogEntry {
        CallLogEntry {
            id: 1,
            number: "555-1234".to_string(),
            name: None,
            call_type,
            date: Utc::now(),
            duration_secs: 0,
            new,
            is_read: false,
        }
    }

    #[test]
    fn test_new_missed_filter() {
        let filter = CallLogFilter::new_missed();
        assert!(filter.matches(&entry(CallType::Missed, true)));
        assert!(!filter.matches(&entry(CallType::Missed, false)));
        assert!(!filter.matches(&entry(CallType::Incoming, true)));
    }

    #[test]
    fn test_all_filter() {
        assert!(CallLogFilter::all().matches(&entry(CallType::Outgoing, false)));
    }

    #[test]
    fn test_mark_read() {
        let mut e = entry(CallType::Missed, true);
        CallLogUpdate::mark_read().apply(&mut e);
        assert!(!e.new);
        assert!(e.is_read);
    }

    #[test]
    fn test_entry_serializes_type_column() {
        let json = serde_json::to_value(entry(CallType::Missed, true)).unwrap();
        assert_eq!(json["type"], "missed");
        assert_eq!(json["new"], true);
    }
}
