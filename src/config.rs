//! 配置 - `~/.config/missed-call-notifier/config.json`
//!
//! 文件不存在时使用默认值；字段可部分覆盖。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::strings::Strings;

/// 配置目录名
const APP_DIR: &str = "missed-call-notifier";

/// 通知器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// 系统语言为从右到左
    pub rtl_context: bool,
    /// 日志输出完整号码（调试用）
    pub log_pii: bool,
    /// 本地化字符串
    pub strings: Strings,
    /// 通话记录文件，默认 `<config_dir>/call_log.jsonl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_log_path: Option<PathBuf>,
    /// 通知记录文件，默认 `<config_dir>/notifications.jsonl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_path: Option<PathBuf>,
}

impl NotifierConfig {
    /// 配置目录
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// 从指定路径加载，文件不存在时返回默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: NotifierConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn call_log_path(&self) -> PathBuf {
        self.call_log_path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("call_log.jsonl"))
    }

    pub fn notifications_path(&self) -> PathBuf {
        self.notifications_path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("notifications.jsonl"))
    }
}
