//! JSONL 文件通话记录 - 每行一个 `CallLogEntry`

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{CallLogEntry, CallLogFilter, CallLogStore, CallLogUpdate};
use crate::file_lock::FileLock;

/// JSONL 文件通话记录
pub struct JsonlCallLog {
    path: PathBuf,
}

impl JsonlCallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_from(file: &File) -> Vec<CallLogEntry> {
        BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// 读取全部行（无锁快照）
    pub fn read_all(&self) -> Vec<CallLogEntry> {
        match File::open(&self.path) {
            Ok(file) => Self::read_from(&file),
            Err(_) => Vec::new(),
        }
    }
}

impl CallLogStore for JsonlCallLog {
    fn update(&self, filter: &CallLogFilter, values: &CallLogUpdate) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }

        let _lock = FileLock::exclusive(&self.path)?;
        let mut rows = Self::read_from(&File::open(&self.path)?);
        let mut updated = 0;
        for row in rows.iter_mut().filter(|r| filter.matches(r)) {
            values.apply(row);
            updated += 1;
        }

        if updated == 0 {
            return Ok(0);
        }

        // 写入临时文件后原子替换
        let temp_path = self.path.with_extension("tmp");
        {
            let mut temp_file = File::create(&temp_path)?;
            for row in &rows {
                writeln!(temp_file, "{}", serde_json::to_string(row)?)?;
            }
        }
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), updated, "Call log rows updated");
        Ok(updated)
    }

    fn query(&self, filter: &CallLogFilter) -> Result<Vec<CallLogEntry>> {
        let mut rows: Vec<CallLogEntry> = self
            .read_all()
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn insert(&self, mut entry: CallLogEntry) -> Result<u64> {
        let _lock = FileLock::exclusive(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let id = Self::read_from(&file).iter().map(|r| r.id).max().unwrap_or(0) + 1;
        entry.id = id;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(id)
    }
}
