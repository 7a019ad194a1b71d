//! Missed Call Notifier CLI
//!
//! 用文件模拟宿主服务，驱动未接来电通知器

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use missed_call_notifier::{
    cli::{
        handle_action, handle_add_missed, handle_clear, handle_log, handle_replay, ActionArgs,
        AddMissedArgs, ClearArgs, LogArgs, ReplayArgs,
    },
    NotifierConfig,
};

#[derive(Parser)]
#[command(name = "mcn")]
#[command(about = "Missed Call Notifier - 检测未接来电并显示汇总通知")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (默认: ~/.config/missed-call-notifier/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 从 JSONL 文件重放呼叫状态变化
    Replay(ReplayArgs),
    /// 清除未接来电：标记已读并撤回通知
    Clear(ClearArgs),
    /// 模拟通知上的操作（回拨、短信、清除、打开通话记录）
    Action(ActionArgs),
    /// 查看通话记录
    Log(LogArgs),
    /// 向通话记录写入一条未接来电
    AddMissed(AddMissedArgs),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("missed_call_notifier=info,mcn=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NotifierConfig::load_from(path)?,
        None => NotifierConfig::load()?,
    };

    match cli.command {
        Commands::Replay(args) => handle_replay(args, config)?,
        Commands::Clear(args) => handle_clear(args, config)?,
        Commands::Action(args) => handle_action(args, config)?,
        Commands::Log(args) => handle_log(args, config)?,
        Commands::AddMissed(args) => handle_add_missed(args, config)?,
    }

    Ok(())
}
