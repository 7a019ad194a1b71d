//! `mcn clear` / `mcn action` 命令 - 模拟用户在通知上的操作

use anyhow::Result;
use clap::Args;

use super::output::format_output;
use super::runtime::Runtime;
use crate::call_log::{CallLogFilter, CallLogStore};
use crate::config::NotifierConfig;
use crate::receiver::HostEffect;

/// Clear 命令参数
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// 只打印不执行
    #[arg(long)]
    pub dry_run: bool,
}

/// Action 命令参数
#[derive(Args, Debug)]
pub struct ActionArgs {
    /// 动作名：view_call_log / clear_missed_calls /
    /// call_back_from_notification / send_sms_from_notification
    pub action: String,
    /// 动作数据（句柄 URI），如 `tel:555-1234`
    #[arg(long)]
    pub data: Option<String>,
    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 处理 clear 命令
pub fn handle_clear(args: ClearArgs, config: NotifierConfig) -> Result<()> {
    let runtime = Runtime::new(config, args.dry_run);
    if args.dry_run {
        let pending = runtime.call_log.query(&CallLogFilter::new_missed())?;
        println!(
            "[DRY-RUN] Would mark {} missed calls as read and cancel the notification",
            pending.len()
        );
        return Ok(());
    }

    runtime.notifier.clear_missed_calls();
    println!("Missed calls cleared");
    Ok(())
}

/// 处理 action 命令
pub fn handle_action(args: ActionArgs, config: NotifierConfig) -> Result<()> {
    let runtime = Runtime::new(config, false);
    let effect = runtime
        .receiver()
        .on_receive_action(&args.action, args.data.as_deref())?;

    if args.json {
        println!("{}", format_output(&effect, true));
    } else {
        println!("{}", describe_effect(&effect));
    }
    Ok(())
}

fn describe_effect(effect: &HostEffect) -> String {
    match effect {
        HostEffect::OpenCallLog => "→ open call log".to_string(),
        HostEffect::Cleared => "✅ missed calls cleared".to_string(),
        HostEffect::Dial(uri) => format!("📞 dial {}", uri),
        HostEffect::ComposeSms(uri) => format!("💬 compose SMS to {}", uri),
    }
}
