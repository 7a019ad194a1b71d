//! Output formatting for CLI commands

use serde::Serialize;

use crate::call_log::CallLogEntry;
use crate::notification::Notification;

/// Pretty JSON, `{}` if serialization fails
pub fn format_output<T: Serialize>(data: &T, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
    } else {
        serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Human-readable notification block
pub fn describe_notification(id: i32, n: &Notification) -> String {
    let mut out = format!("🔔 [{}] {}\n   {}", id, n.title, n.text);
    out.push_str(&format!("\n   tap: {}", n.content_intent.action));
    if let Some(delete) = &n.delete_intent {
        out.push_str(&format!("\n   dismiss: {}", delete.action));
    }
    for action in &n.actions {
        let data = action
            .intent
            .data
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default();
        out.push_str(&format!("\n   [{}] {}", action.title, data));
    }
    if n.large_icon.is_some() {
        out.push_str("\n   (large icon)");
    }
    out
}

/// One line per call log row
pub fn describe_call_log_entry(entry: &CallLogEntry) -> String {
    let flags = match (entry.new, entry.is_read) {
        (true, _) => "new",
        (false, true) => "read",
        (false, false) => "",
    };
    format!(
        "{:>4}  {}  {:<9} {:<20} {}",
        entry.id,
        entry.date.format("%Y-%m-%d %H:%M"),
        format!("{:?}", entry.call_type).to_lowercase(),
        entry.name.as_deref().unwrap_or(&entry.number),
        flags
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentFactory;
    use crate::uri::Uri;
    use crate::notification::NotificationAction;
    use chrono::Utc;

    #[test]
    fn test_describe_notification() {
        let intents = IntentFactory::new();
        let n = Notification::builder()
            .title("Missed call")
            .text("Alice")
            .content_intent(intents.call_log())
            .delete_intent(intents.clear_missed_calls())
            .action(NotificationAction::new("i", "Call back", intents.call_back(&Uri::tel("555"))))
            .build()
            .unwrap();

        let text = describe_notification(1, &n);
        assert!(text.contains("Missed call"));
        assert!(text.contains("Alice"));
        assert!(text.contains("[Call back] tel:555"));
        assert!(text.contains("ACTION_CLEAR_MISSED_CALLS"));
    }

    #[test]
    fn test_describe_call_log_entry() {
        let entry = CallLogEntry::missed("555-1234", Utc::now());
        let line = describe_call_log_entry(&entry);
        assert!(line.contains("missed"));
        assert!(line.contains("555-1234"));
        assert!(line.ends_with("new"));
    }
}
