//! 未接来电通知 - 检测未接来电并维护唯一的一条汇总通知
//!
//! - 1 个未接来电：标题 "Missed call"，正文为来电方，附带回拨/短信按钮
//! - 多个未接来电：标题 "Missed calls"，正文为数量，不带按钮
//! - 清除：通话记录标记已读，计数归零，撤回通知
//!
//! 计数和通知的更新在同一把锁内完成，清除和新来电不会交错。

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::bidi::BidiFormatter;
use crate::call::{Call, CallState, DisconnectCause};
use crate::call_log::{CallLogFilter, CallLogStore, CallLogUpdate};
use crate::config::NotifierConfig;
use crate::intent::IntentFactory;
use crate::listener::CallsManagerListener;
use crate::notification::descriptor::{icon, Notification, NotificationAction};
use crate::notification::sink::NotificationSink;
use crate::strings::Strings;
use crate::uri::Uri;

/// 未接来电通知的固定 id，后发的通知替换先前的
pub const MISSED_CALL_NOTIFICATION_ID: i32 = 1;

/// 未接来电通知器
pub struct MissedCallNotifier {
    sink: Arc<dyn NotificationSink>,
    call_log: Arc<dyn CallLogStore>,
    intents: IntentFactory,
    strings: Strings,
    bidi: BidiFormatter,
    log_pii: bool,
    /// 上次清除以来的未接来电数
    missed_call_count: Mutex<u32>,
}

impl MissedCallNotifier {
    pub fn new(sink: Arc<dyn NotificationSink>, call_log: Arc<dyn CallLogStore>) -> Self {
        Self {
            sink,
            call_log,
            intents: IntentFactory::new(),
            strings: Strings::default(),
            bidi: BidiFormatter::default(),
            log_pii: false,
            missed_call_count: Mutex::new(0),
        }
    }

    /// 按配置创建
    pub fn from_config(
        config: &NotifierConfig,
        sink: Arc<dyn NotificationSink>,
        call_log: Arc<dyn CallLogStore>,
    ) -> Self {
        Self::new(sink, call_log)
            .with_strings(config.strings.clone())
            .with_bidi(BidiFormatter::new(config.rtl_context))
            .with_log_pii(config.log_pii)
    }

    pub fn with_strings(mut self, strings: Strings) -> Self {
        self.strings = strings;
        self
    }

    pub fn with_bidi(mut self, bidi: BidiFormatter) -> Self {
        self.bidi = bidi;
        self
    }

    /// 日志中是否输出完整号码
    pub fn with_log_pii(mut self, log_pii: bool) -> Self {
        self.log_pii = log_pii;
        self
    }

    /// 上次清除以来的未接来电数
    pub fn missed_call_count(&self) -> u32 {
        *self.lock_count()
    }

    fn lock_count(&self) -> MutexGuard<'_, u32> {
        // 计数只是一个整数，锁中毒后继续使用其值
        self.missed_call_count
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn handle_for_log(&self, handle: &Uri) -> String {
        if self.log_pii {
            handle.to_string()
        } else {
            handle.redacted()
        }
    }

    /// 是否为未接来电转换：RINGING -> DISCONNECTED 且原因为 INCOMING_MISSED
    pub fn is_missed_call(call: &Call, old_state: CallState, new_state: CallState) -> bool {
        old_state == CallState::Ringing
            && new_state == CallState::Disconnected
            && call.disconnect_cause == DisconnectCause::IncomingMissed
    }

    /// 清除未接来电：通话记录标记已读，计数归零，撤回通知
    pub fn clear_missed_calls(&self) {
        let mut count = self.lock_count();

        match self
            .call_log
            .update(&CallLogFilter::new_missed(), &CallLogUpdate::mark_read())
        {
            Ok(updated) => debug!(updated, "Marked new missed calls as read"),
            Err(e) => warn!(error = %e, "Failed to mark missed calls as read"),
        }

        let previous = *count;
        *count = 0;

        if let Err(e) = self.sink.cancel(MISSED_CALL_NOTIFICATION_ID) {
            warn!(
                sink = self.sink.name(),
                error = %e,
                "Failed to cancel missed call notification"
            );
        }
        info!(previous, "Missed call notification cleared");
    }

    /// 显示（或替换）未接来电通知
    pub fn show_missed_call_notification(&self, call: &Call) {
        let mut count = self.lock_count();
        *count += 1;
        let missed = *count;

        let notification = match self.compose(call, missed) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = e, "Failed to build missed call notification");
                return;
            }
        };

        info!(call = %call, missed, "Adding missed call notification");
        if let Err(e) = self.sink.notify(MISSED_CALL_NOTIFICATION_ID, &notification) {
            warn!(
                sink = self.sink.name(),
                error = %e,
                "Failed to post missed call notification"
            );
        }
    }

    /// 组装通知
    fn compose(&self, call: &Call, missed: u32) -> Result<Notification, &'static str> {
        let (title, text) = if missed == 1 {
            (self.strings.missed_call_title.clone(), self.name_for_call(call))
        } else {
            (
                self.strings.missed_calls_title.clone(),
                self.strings.missed_calls_msg(missed),
            )
        };

        let mut builder = Notification::builder()
            .small_icon(icon::STAT_NOTIFY_MISSED_CALL)
            .when(call.creation_time)
            .title(title)
            .text(text)
            .content_intent(self.intents.call_log())
            .auto_cancel(true)
            .delete_intent(self.intents.clear_missed_calls());

        let handle = &call.handle;

        // 只有一个未接来电时才附带回拨和短信
        if missed == 1 {
            debug!(handle = %self.handle_for_log(handle), "Add actions with number");

            builder = builder
                .action(NotificationAction::new(
                    icon::STAT_SYS_PHONE_CALL,
                    self.strings.call_back.clone(),
                    self.intents.call_back(handle),
                ))
                .action(NotificationAction::new(
                    icon::IC_TEXT,
                    self.strings.message.clone(),
                    self.intents.send_sms(handle),
                ));

            if let Some(bitmap) = call.large_icon() {
                builder = builder.large_icon(bitmap.clone());
            }
        } else {
            debug!(
                handle = %self.handle_for_log(handle),
                missed,
                "Suppress actions"
            );
        }

        let mut notification = builder.build()?;
        notification.configure_lights();
        Ok(notification)
    }

    /// 通知正文中的来电方：显示名 > LTR 包装的号码 > "Unknown"
    pub fn name_for_call(&self, call: &Call) -> String {
        if let Some(name) = call.name.as_deref() {
            if !name.is_empty() && is_graphic(name) {
                return name.to_string();
            }
        }

        let handle = call.handle.scheme_specific_part();
        if !handle.is_empty() {
            return self.bidi.unicode_wrap_ltr(handle);
        }

        self.strings.unknown.clone()
    }
}

impl CallsManagerListener for MissedCallNotifier {
    fn name(&self) -> &str {
        "missed_call_notifier"
    }

    fn on_call_state_changed(&self, call: &Call, old_state: CallState, new_state: CallState) {
        if Self::is_missed_call(call, old_state, new_state) {
            self.show_missed_call_notification(call);
        }
    }
}

/// 至少包含一个可见字符
fn is_graphic(s: &str) -> bool {
    s.chars()
        .any(|c| !c.is_whitespace() && !c.is_control() && !is_format_char(c))
}

/// Unicode Cf（格式字符）类别
fn is_format_char(c: char) -> bool {
    matches!(c as u32,
        0x00AD
        | 0x0600..=0x0605
        | 0x061C
        | 0x06DD
        | 0x070F
        | 0x0890..=0x0891
        | 0x08E2
        | 0x180E
        | 0x200B..=0x200F
        | 0x202A..=0x202E
        | 0x2060..=0x2064
        | 0x2066..=0x206F
        | 0xFEFF
        | 0xFFF9..=0xFFFB
        | 0x110BD
        | 0x110CD
        | 0x13430..=0x1343F
        | 0x1BCA0..=0x1BCA3
        | 0x1D173..=0x1D17A
        | 0xE0001
        | 0xE0020..=0xE007F)
}
