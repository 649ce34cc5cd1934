use crate::adapter::TermRenderer;
use crate::domain::{Record, ResponsePayload};
use serde_json::json;

fn record(full_response: ResponsePayload, text_response: &str) -> Record {
    Record {
        timestamp: "2026-08-06T12:00:00Z".to_string(),
        model: "gemini-2.0-flash".to_string(),
        prompt: "say hello".to_string(),
        full_response,
        text_response: text_response.to_string(),
    }
}

fn render_plain(records: &[Record]) -> String {
    let renderer = TermRenderer::new(false);
    let mut out = Vec::new();
    renderer.render(records, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_render_empty_log() {
    assert_eq!(render_plain(&[]), "No history.\n");
}

#[test]
fn test_render_structured_record() {
    let v = json!({
        "candidates": [{"content": {"parts": [{"text": "hello"}]}}],
        "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 12, "totalTokenCount": 21}
    });
    let out = render_plain(&[record(ResponsePayload::Structured(v), "hello")]);

    assert!(out.contains("[1] 2026-08-06T12:00:00Z  gemini-2.0-flash"));
    assert!(out.contains("prompt: say hello"));
    assert!(out.contains("│ hello │"));
    assert!(out.contains("\"candidates\""));
    assert!(out.contains("tokens: prompt=9 response=12 total=21"));
}

#[test]
fn test_render_usage_line_partial() {
    let v = json!({"usageMetadata": {"promptTokenCount": 7}});
    let out = render_plain(&[record(ResponsePayload::Structured(v), "")]);
    assert!(out.contains("tokens: prompt=7\n"));
    assert!(!out.contains("response="));
    assert!(!out.contains("total="));
}

#[test]
fn test_render_usage_line_needs_prompt_tokens() {
    // promptTokenCount が無ければ他のカウントがあっても行ごと出さない
    let v = json!({"usageMetadata": {"candidatesTokenCount": 12}});
    let out = render_plain(&[record(ResponsePayload::Structured(v), "")]);
    assert!(!out.contains("tokens:"));
}

#[test]
fn test_render_opaque_record_verbatim() {
    let out = render_plain(&[record(
        ResponsePayload::Text("<html>bad gateway</html>".to_string()),
        "",
    )]);
    assert!(out.contains("<html>bad gateway</html>"));
    assert!(!out.contains("┌"));
}

#[test]
fn test_render_skips_box_for_empty_marker() {
    let v = json!({"candidates": []});
    let out = render_plain(&[record(ResponsePayload::Structured(v), "(empty)")]);
    assert!(!out.contains("┌"));
}

#[test]
fn test_render_indexes_are_one_based_in_stored_order() {
    let newest = record(ResponsePayload::Text("n".to_string()), "");
    let mut oldest = record(ResponsePayload::Text("o".to_string()), "");
    oldest.prompt = "older prompt".to_string();
    let out = render_plain(&[newest, oldest]);

    let pos_first = out.find("[1]").unwrap();
    let pos_second = out.find("[2]").unwrap();
    assert!(pos_first < pos_second);
    assert!(out.contains("older prompt"));
}

#[test]
fn test_render_plain_output_has_no_ansi() {
    let v = json!({"candidates": [{"content": {"parts": [{"text": "hi"}]}}]});
    let out = render_plain(&[record(ResponsePayload::Structured(v), "hi")]);
    assert!(!out.contains('\x1b'));
}

#[test]
fn test_render_color_output_has_ansi() {
    let renderer = TermRenderer::new(true);
    let v = json!({"a": 1});
    let mut out = Vec::new();
    renderer
        .render(&[record(ResponsePayload::Structured(v), "")], &mut out)
        .unwrap();
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("\x1b[36m\"a\"\x1b[0m"));
    assert!(s.contains("\x1b[33m1\x1b[0m"));
}

#[test]
fn test_render_wraps_long_answer_text() {
    let long = "word ".repeat(40);
    let out = render_plain(&[record(
        ResponsePayload::Text("x".to_string()),
        long.trim(),
    )]);
    // 72 文字で折り返すので枠の中身は複数行になる
    let boxed_lines = out.lines().filter(|l| l.starts_with('│')).count();
    assert!(boxed_lines >= 2);
}
