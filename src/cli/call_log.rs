//! `mcn log` / `mcn add-missed` 命令 - 查看和写入通话记录

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use super::output::{describe_call_log_entry, format_output};
use crate::call_log::{CallLogEntry, CallLogFilter, CallLogStore, JsonlCallLog};
use crate::config::NotifierConfig;

/// Log 命令参数
#[derive(Args, Debug)]
pub struct LogArgs {
    /// 只显示未读的未接来电
    #[arg(long)]
    pub missed: bool,
    /// 显示最近 N 条
    #[arg(long, short, default_value = "20")]
    pub limit: usize,
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// AddMissed 命令参数
#[derive(Args, Debug)]
pub struct AddMissedArgs {
    /// 来电号码
    pub number: String,
    /// 联系人名称
    #[arg(long)]
    pub name: Option<String>,
}

/// 处理 log 命令
pub fn handle_log(args: LogArgs, config: NotifierConfig) -> Result<()> {
    let store = JsonlCallLog::new(config.call_log_path());
    let filter = if args.missed {
        CallLogFilter::new_missed()
    } else {
        CallLogFilter::all()
    };

    let mut rows = store.query(&filter)?;
    rows.truncate(args.limit);

    if args.json {
        println!("{}", format_output(&rows, true));
        return Ok(());
    }

    if rows.is_empty() {
        println!("Call log is empty");
    }
    for row in &rows {
        println!("{}", describe_call_log_entry(row));
    }
    Ok(())
}

/// 处理 add-missed 命令
pub fn handle_add_missed(args: AddMissedArgs, config: NotifierConfig) -> Result<()> {
    let store = JsonlCallLog::new(config.call_log_path());
    let mut entry = CallLogEntry::missed(args.number, Utc::now());
    entry.name = args.name;

    let id = store.insert(entry)?;
    println!("Added missed call #{}", id);
    Ok(())
}
