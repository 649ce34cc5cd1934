use crate::adapter::{JsonHistoryStore, NoopLog, StdFileSystem};
use crate::domain::{ModelName, Prompt, ResponsePayload};
use crate::ports::outbound::{Clock, HistoryStore};
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::sync::Arc;

/// テスト用の固定時刻 Clock
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn store_at(path: &Path) -> JsonHistoryStore {
    let fixed = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
    JsonHistoryStore::new(
        Arc::new(StdFileSystem),
        Arc::new(FixedClock(fixed)),
        Arc::new(NoopLog),
        path,
    )
}

fn model() -> ModelName {
    ModelName::new("gemini-2.0-flash")
}

const STRUCTURED_RAW: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}],"usageMetadata":{"promptTokenCount":3}}"#;

#[test]
fn test_append_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));

    store
        .append(&model(), &Prompt::new("say hello"), STRUCTURED_RAW)
        .unwrap();
    let records = store.load().unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.timestamp, "2026-08-06T12:00:00Z");
    assert_eq!(r.model, "gemini-2.0-flash");
    assert_eq!(r.prompt, "say hello");
    assert!(r.full_response.is_structured());
    assert_eq!(r.text_response, "hello");
}

#[test]
fn test_append_opaque_stores_plain_string() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));

    store
        .append(&model(), &Prompt::new("p"), "<html>bad gateway</html>")
        .unwrap();
    let records = store.load().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].full_response,
        ResponsePayload::Text("<html>bad gateway</html>".to_string())
    );
    assert_eq!(records[0].text_response, "<html>bad gateway</html>");
}

#[test]
fn test_load_returns_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));

    for i in 1..=3 {
        store
            .append(&model(), &Prompt::new(format!("prompt-{}", i)), "{}")
            .unwrap();
    }
    let records = store.load().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].prompt, "prompt-3");
    assert_eq!(records[1].prompt, "prompt-2");
    assert_eq!(records[2].prompt, "prompt-1");
}

#[test]
fn test_bounding_evicts_oldest_beyond_cap() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));

    for i in 1..=55 {
        store
            .append(&model(), &Prompt::new(format!("prompt-{}", i)), "{}")
            .unwrap();
    }
    let records = store.load().unwrap();

    assert_eq!(records.len(), 50);
    assert_eq!(records[0].prompt, "prompt-55");
    assert_eq!(records[49].prompt, "prompt-6");
    assert!(records.iter().all(|r| r.prompt != "prompt-1"));
    assert!(records.iter().all(|r| r.prompt != "prompt-5"));
}

#[test]
fn test_clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));

    store.append(&model(), &Prompt::new("p"), "{}").unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_initialize_creates_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = store_at(&path);

    store.initialize().unwrap();

    assert!(path.exists());
    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_initialize_resets_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{not valid json").unwrap();
    let store = store_at(&path);

    store.initialize().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_initialize_keeps_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = store_at(&path);

    store.append(&model(), &Prompt::new("kept"), "{}").unwrap();
    store.initialize().unwrap();

    let records = store.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].prompt, "kept");
}

#[test]
fn test_load_absent_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_at(&dir.path().join("history.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_empty_file_is_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "").unwrap();
    let store = store_at(&path);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_corrupt_file_does_not_crash() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "]]]]").unwrap();
    let store = store_at(&path);

    // load は読み取り専用: 空を返すだけでファイルは書き換えない
    assert!(store.load().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "]]]]");
}

#[test]
fn test_append_over_corrupt_file_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "garbage").unwrap();
    let store = store_at(&path);

    store.append(&model(), &Prompt::new("fresh"), "{}").unwrap();

    let records = store.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].prompt, "fresh");
}

#[test]
fn test_append_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("history.json");
    let store = store_at(&path);

    store.append(&model(), &Prompt::new("p"), "{}").unwrap();

    assert!(path.exists());
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_append_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = store_at(&path);

    store.append(&model(), &Prompt::new("p"), "{}").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["history.json".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_history_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = store_at(&path);

    store.append(&model(), &Prompt::new("p"), "{}").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
