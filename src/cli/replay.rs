//! `mcn replay` 命令 - 从 JSONL 重放呼叫状态变化
//!
//! 每行一个事件：
//! ```text
//! {"call": {"handle": "tel:555-1234", "name": "Alice", "disconnect_cause": "incoming_missed"},
//!  "old_state": "ringing", "new_state": "disconnected"}
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use super::output::{describe_notification, format_output};
use super::runtime::Runtime;
use crate::call::{Call, CallState};
use crate::call_log::{CallLogEntry, CallLogStore};
use crate::config::NotifierConfig;
use crate::listener::{CallEventBus, CallsManagerListener};
use crate::notification::Notification;
use crate::notifier::{MissedCallNotifier, MISSED_CALL_NOTIFICATION_ID};

/// Replay 命令参数
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// 事件文件（JSONL）
    pub events: PathBuf,
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
    /// 只打印不发送通知
    #[arg(long)]
    pub dry_run: bool,
    /// 不把未接来电写入通话记录
    #[arg(long)]
    pub no_record: bool,
}

/// 一次呼叫状态变化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEvent {
    pub call: Call,
    pub old_state: CallState,
    pub new_state: CallState,
}

/// 解析事件文件内容，空行和 `#` 注释行跳过
pub fn parse_events(content: &str) -> Result<Vec<CallEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid event on line {}", idx + 1))
        })
        .collect()
}

/// 模拟宿主：未接来电写入通话记录
pub struct CallLogRecorder {
    call_log: Arc<dyn CallLogStore>,
}

impl CallLogRecorder {
    pub fn new(call_log: Arc<dyn CallLogStore>) -> Self {
        Self { call_log }
    }
}

impl CallsManagerListener for CallLogRecorder {
    fn name(&self) -> &str {
        "call_log_recorder"
    }

    fn on_call_state_changed(&self, call: &Call, old_state: CallState, new_state: CallState) {
        if !MissedCallNotifier::is_missed_call(call, old_state, new_state) {
            return;
        }

        let mut entry = CallLogEntry::missed(call.handle.scheme_specific_part(), call.creation_time);
        entry.name = call.name.clone().filter(|n| !n.trim().is_empty());
        match self.call_log.insert(entry) {
            Ok(id) => debug!(id, "Missed call recorded in call log"),
            Err(e) => warn!(error = %e, "Failed to record missed call"),
        }
    }
}

/// 把事件依次交给总线
pub fn replay(bus: &CallEventBus, events: &[CallEvent]) {
    for event in events {
        bus.call_state_changed(&event.call, event.old_state, event.new_state);
    }
}

/// 重放结果
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub missed_calls: u32,
    pub dry_run: bool,
    pub notification: Option<Notification>,
}

impl ReplaySummary {
    /// dry-run 时文件里只有之前运行留下的通知，不读取
    pub fn collect(runtime: &Runtime, events: usize, dry_run: bool) -> Self {
        let notification = if dry_run {
            None
        } else {
            runtime
                .file_sink
                .active()
                .remove(&MISSED_CALL_NOTIFICATION_ID)
        };
        Self {
            events,
            missed_calls: runtime.notifier.missed_call_count(),
            dry_run,
            notification,
        }
    }
}

/// 处理 replay 命令
pub fn handle_replay(args: ReplayArgs, config: NotifierConfig) -> Result<()> {
    let content = fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read {}", args.events.display()))?;
    let events = parse_events(&content)?;

    let runtime = Runtime::new(config, args.dry_run);
    let mut bus = CallEventBus::new();
    if !args.no_record && !args.dry_run {
        bus.register(Arc::new(CallLogRecorder::new(runtime.call_log.clone())));
    }
    bus.register(runtime.notifier.clone());

    replay(&bus, &events);

    let summary = ReplaySummary::collect(&runtime, events.len(), args.dry_run);

    if args.json {
        println!("{}", format_output(&summary, true));
    } else {
        println!(
            "Replayed {} events, {} missed",
            summary.events, summary.missed_calls
        );
        match (&summary.notification, summary.dry_run) {
            (_, true) => println!("[DRY-RUN] Nothing posted"),
            (Some(n), false) => {
                println!("{}", describe_notification(MISSED_CALL_NOTIFICATION_ID, n))
            }
            (None, false) => println!("No missed call notification"),
        }
    }

    Ok(())
}
