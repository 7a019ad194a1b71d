//! 文件宿主测试 - JSONL 通话记录 + 文件通知服务

use std::fs;
use std::sync::Arc;

use missed_call_notifier::call_log::CallType;
use chrono::Utc;
use missed_call_notifier::cli::{
    handle_clear, parse_events, replay, CallLogRecorder, ClearArgs, Runtime,
};
use missed_call_notifier::{
    CallEventBus, CallLogEntry, CallLogFilter, CallLogStore, FileSink, JsonlCallLog, MissedCallNotifier,
    NotifierConfig, MISSED_CALL_NOTIFICATION_ID,
};
use tempfile::tempdir;

const EVENTS: &str = r#"
{"call": {"handle": "tel:555-1234", "name": "Alice", "disconnect_cause": "incoming_missed"}, "old_state": "ringing", "new_state": "disconnected"}
{"call": {"handle": "tel:555-0000", "disconnect_cause": "normal"}, "old_state": "active", "new_state": "disconnected"}
{"call": {"handle": "tel:555-9999", "disconnect_cause": "incoming_missed"}, "old_state": "ringing", "new_state": "disconnected"}
"#;

#[test]
fn test_replay_into_files() {
    let temp = tempdir().unwrap();
    let call_log = Arc::new(JsonlCallLog::new(temp.path().join("call_log.jsonl")));
    let sink = Arc::new(FileSink::new(temp.path().join("notifications.jsonl")));
    let notifier = Arc::new(MissedCallNotifier::new(sink.clone(), call_log.clone()));

    let mut bus = CallEventBus::new();
    bus.register(Arc::new(CallLogRecorder::new(call_log.clone())));
    bus.register(notifier.clone());

    let events = parse_events(EVENTS).unwrap();
    replay(&bus, &events);

    assert_eq!(notifier.missed_call_count(), 2);

    let rows = call_log.query(&CallLogFilter::new_missed()).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.call_type == CallType::Missed));

    let active = sink.active();
    let n = active.get(&MISSED_CALL_NOTIFICATION_ID).unwrap();
    assert_eq!(n.title, "Missed calls");
    assert_eq!(n.text, "2 missed calls");

    notifier.clear_missed_calls();
    assert!(sink.active().is_empty());
    assert!(call_log.query(&CallLogFilter::new_missed()).unwrap().is_empty());
    assert_eq!(call_log.read_all().len(), 2);
}

#[test]
fn test_runtime_uses_configured_paths() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.json");
    let call_log_path = temp.path().join("calls.jsonl");
    let notifications_path = temp.path().join("shown.jsonl");
    fs::write(
        &config_path,
        serde_json::json!({
            "call_log_path": call_log_path,
            "notifications_path": notifications_path,
            "strings": { "unknown": "Private" }
        })
        .to_string(),
    )
    .unwrap();

    let config = NotifierConfig::load_from(&config_path).unwrap();
    let runtime = Runtime::new(config, false);

    let events = parse_events(
        r#"{"call": {"handle": "tel:", "disconnect_cause": "incoming_missed"}, "old_state": "ringing", "new_state": "disconnected"}"#,
    )
    .unwrap();
    let mut bus = CallEventBus::new();
    bus.register(runtime.notifier.clone());
    replay(&bus, &events);

    assert!(notifications_path.exists());
    let active = runtime.file_sink.active();
    assert_eq!(active.get(&MISSED_CALL_NOTIFICATION_ID).unwrap().text, "Private");

    // 另一个进程清除：计数从 0 开始，但仍会撤回通知
    let other = Runtime::new(NotifierConfig::load_from(&config_path).unwrap(), false);
    other.notifier.clear_missed_calls();
    assert!(FileSink::new(&notifications_path).active().is_empty());
}

#[test]
fn test_dry_run_posts_nothing() {
    let temp = tempdir().unwrap();
    let config = NotifierConfig {
        call_log_path: Some(temp.path().join("calls.jsonl")),
        notifications_path: Some(temp.path().join("shown.jsonl")),
        ..NotifierConfig::default()
    };
    let runtime = Runtime::new(config, true);

    let mut bus = CallEventBus::new();
    bus.register(runtime.notifier.clone());
    replay(&bus, &parse_events(EVENTS).unwrap());

    assert_eq!(runtime.notifier.missed_call_count(), 2);
    assert!(runtime.file_sink.read_records().is_empty());
}

#[test]
fn test_dry_run_clear_keeps_call_log() {
    let temp = tempdir().unwrap();
    let config = NotifierConfig {
        call_log_path: Some(temp.path().join("calls.jsonl")),
        notifications_path: Some(temp.path().join("shown.jsonl")),
        ..NotifierConfig::default()
    };
    let call_log = JsonlCallLog::new(config.call_log_path());
    call_log
        .insert(CallLogEntry::missed("555-1234", Utc::now()))
        .unwrap();

    handle_clear(ClearArgs { dry_run: true }, config.clone()).unwrap();
    assert_eq!(call_log.query(&CallLogFilter::new_missed()).unwrap().len(), 1);
    assert!(FileSink::new(config.notifications_path()).read_records().is_empty());

    handle_clear(ClearArgs { dry_run: false }, config).unwrap();
    assert!(call_log.query(&CallLogFilter::new_missed()).unwrap().is_empty());
}
