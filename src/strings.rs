//! 本地化字符串表 - 通知中所有用户可见文本
//!
//! 默认英文，可通过配置文件逐项覆盖。

use serde::{Deserialize, Serialize};

/// 计数占位符
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// 本地化字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    /// 单个未接来电标题
    pub missed_call_title: String,
    /// 多个未接来电标题
    pub missed_calls_title: String,
    /// 多个未接来电正文，`{count}` 替换为数量
    pub missed_calls_msg: String,
    /// 无法识别来电方时的占位
    pub unknown: String,
    /// "回拨" 按钮
    pub call_back: String,
    /// "短信" 按钮
    pub message: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            missed_call_title: "Missed call".to_string(),
            missed_calls_title: "Missed calls".to_string(),
            missed_calls_msg: "{count} missed calls".to_string(),
            unknown: "Unknown".to_string(),
            call_back: "Call back".to_string(),
            message: "Message".to_string(),
        }
    }
}

impl Strings {
    /// 格式化聚合消息
    pub fn missed_calls_msg(&self, count: u32) -> String {
        if self.missed_calls_msg.contains(COUNT_PLACEHOLDER) {
            self.missed_calls_msg
                .replace(COUNT_PLACEHOLDER, &count.to_string())
        } else {
            // 模板里没有占位符时把数量放在前面，保证数量始终可见
            format!("{} {}", count, self.missed_calls_msg)
        }
    }
}
