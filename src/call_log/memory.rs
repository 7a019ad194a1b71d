//! 内存通话记录

use anyhow::{anyhow, Result};
use std::sync::Mutex;

use super::{CallLogEntry, CallLogFilter, CallLogStore, CallLogUpdate};

/// 内存通话记录
#[derive(Default)]
pub struct InMemoryCallLog {
    rows: Mutex<Vec<CallLogEntry>>,
}

impl InMemoryCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用给定行初始化
    pub fn with_entries(entries: Vec<CallLogEntry>) -> Self {
        Self {
            rows: Mutex::new(entries),
        }
    }

    /// 当前全部行
    pub fn entries(&self) -> Vec<CallLogEntry> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl CallLogStore for InMemoryCallLog {
    fn update(&self, filter: &CallLogFilter, values: &CallLogUpdate) -> Result<usize> {
        let mut rows = self.rows.lock().map_err(|_| anyhow!("call log lock poisoned"))?;
        let mut updated = 0;
        for row in rows.iter_mut().filter(|r| filter.matches(r)) {
            values.apply(row);
            updated += 1;
        }
        Ok(updated)
    }

    fn query(&self, filter: &CallLogFilter) -> Result<Vec<CallLogEntry>> {
        let rows = self.rows.lock().map_err(|_| anyhow!("call log lock poisoned"))?;
        let mut matched: Vec<CallLogEntry> =
            rows.iter().filter(|r| filter.matches(r)).cloned().collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matched)
    }

    fn insert(&self, mut entry: CallLogEntry) -> Result<u64> {
        let mut rows = self.rows.lock().map_err(|_| anyhow!("call log lock poisoned"))?;
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        entry.id = id;
        rows.push(entry);
        Ok(id)
    }
}
