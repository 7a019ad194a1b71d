//! 本地文件通知服务 - 把 notify/cancel 追加到 JSONL 文件
//!
//! 宿主（或 CLI）读取文件重放得到当前显示的通知。

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::file_lock::FileLock;
use crate::notification::descriptor::Notification;
use crate::notification::sink::NotificationSink;

/// 记录条数超过此值时压缩
const MAX_RECORDS: usize = 200;
const COMPACT_CHECK_INTERVAL: usize = 10;

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOp {
    Notify,
    Cancel,
}

/// 通知记录（JSONL 格式）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// ISO8601 时间戳
    pub ts: DateTime<Utc>,
    pub op: RecordOp,
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// 本地文件通知服务
pub struct FileSink {
    path: PathBuf,
    write_count: AtomicUsize,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_count: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加记录（带文件锁）
    fn append(&self, record: &NotificationRecord) -> Result<()> {
        {
            let _lock = FileLock::exclusive(&self.path)?;
            let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            writeln!(file, "{}", serde_json::to_string(record)?)?;
        }

        self.maybe_compact();
        Ok(())
    }

    /// 读取全部记录，跳过无法解析的行
    pub fn read_records(&self) -> Vec<NotificationRecord> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// 重放记录，得到当前显示的通知
    pub fn active(&self) -> BTreeMap<i32, Notification> {
        fold_active(self.read_records())
    }

    fn maybe_compact(&self) {
        let count = self.write_count.fetch_add(1, Ordering::Relaxed);
        if count % COMPACT_CHECK_INTERVAL != 0 {
            return;
        }
        if let Err(e) = self.compact() {
            debug!(path = %self.path.display(), error = %e, "Notification file compaction skipped");
        }
    }

    /// 只保留当前显示的通知
    fn compact(&self) -> Result<()> {
        let _lock = FileLock::exclusive(&self.path)?;
        let file = File::open(&self.path)?;

        let records: Vec<NotificationRecord> = BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        if records.len() <= MAX_RECORDS {
            return Ok(());
        }

        let latest: Vec<NotificationRecord> = {
            let mut by_id: BTreeMap<i32, NotificationRecord> = BTreeMap::new();
            for record in records {
                match record.op {
                    RecordOp::Notify => {
                        by_id.insert(record.id, record);
                    }
                    RecordOp::Cancel => {
                        by_id.remove(&record.id);
                    }
                }
            }
            by_id.into_values().collect()
        };

        let temp_path = self.path.with_extension("tmp");
        {
            let mut temp_file = File::create(&temp_path)?;
            for record in &latest {
                writeln!(temp_file, "{}", serde_json::to_string(record)?)?;
            }
        }

        // 原子替换
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// 按顺序重放 notify/cancel
fn fold_active(records: Vec<NotificationRecord>) -> BTreeMap<i32, Notification> {
    let mut active = BTreeMap::new();
    for record in records {
        match (record.op, record.notification) {
            (RecordOp::Notify, Some(n)) => {
                active.insert(record.id, n);
            }
            (RecordOp::Notify, None) => {}
            (RecordOp::Cancel, _) => {
                active.remove(&record.id);
            }
        }
    }
    active
}

impl NotificationSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn notify(&self, id: i32, notification: &Notification) -> Result<()> {
        self.append(&NotificationRecord {
            ts: Utc::now(),
            op: RecordOp::Notify,
            id,
            notification: Some(notification.clone()),
        })?;
        debug!(sink = "file", id, path = %self.path.display(), "Notification recorded");
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        self.append(&NotificationRecord {
            ts: Utc::now(),
            op: RecordOp::Cancel,
            id,
            notification: None,
        })?;
        debug!(sink = "file", id, path = %self.path.display(), "Notification cancel recorded");
        Ok(())
    }
}
