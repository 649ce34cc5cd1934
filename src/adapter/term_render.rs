//! 履歴の端末向けレンダリング
//!
//! レコード列（新しい順）を 1 件ずつ、ヘッダ・プロンプト・回答テキスト・
//! フルレスポンス・トークン数の順で書き出す。枠の文字や折り返し幅は
//! 表示上の都合であり契約ではない。

use crate::domain::{extract_usage, Record, ResponsePayload};
use serde_json::Value;
use std::io::{self, Write};

/// 回答テキスト枠の折り返し幅（文字数）
const WRAP_WIDTH: usize = 72;

/// 回答が空だったことを示す保存済みマーカー。枠は出さない
const EMPTY_TEXT_MARKER: &str = "(empty)";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";

/// 履歴を人間向けに書き出すレンダラ
pub struct TermRenderer {
    color: bool,
}

impl TermRenderer {
    /// color は端末出力時のみ true にする（パイプ時は素のテキスト）
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// レコード列全体を書き出す。空なら "No history." のみ
    pub fn render(&self, records: &[Record], out: &mut dyn Write) -> io::Result<()> {
        if records.is_empty() {
            writeln!(out, "No history.")?;
            return Ok(());
        }
        for (idx, record) in records.iter().enumerate() {
            self.render_record(idx + 1, record, out)?;
        }
        Ok(())
    }

    fn render_record(&self, index: usize, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        let header = format!("[{}] {}  {}", index, record.timestamp, record.model);
        writeln!(out, "{}", self.paint(BOLD, &header))?;
        writeln!(out, "prompt: {}", record.prompt)?;

        if !record.text_response.is_empty() && record.text_response != EMPTY_TEXT_MARKER {
            self.render_text_box(&record.text_response, out)?;
        }

        match &record.full_response {
            ResponsePayload::Structured(v) => {
                self.write_json(v, 0, out)?;
                writeln!(out)?;
                let usage = extract_usage(v);
                if let Some(prompt_tokens) = usage.prompt_tokens {
                    let mut parts = vec![format!("prompt={}", prompt_tokens)];
                    if let Some(n) = usage.response_tokens {
                        parts.push(format!("response={}", n));
                    }
                    if let Some(n) = usage.total_tokens {
                        parts.push(format!("total={}", n));
                    }
                    writeln!(out, "tokens: {}", parts.join(" "))?;
                }
            }
            ResponsePayload::Text(t) => {
                writeln!(out, "{}", t.trim_end_matches('\n'))?;
            }
        }
        writeln!(out)
    }

    /// 回答テキストを折り返して枠で囲む
    fn render_text_box(&self, text: &str, out: &mut dyn Write) -> io::Result<()> {
        let lines = wrap_text(text, WRAP_WIDTH);
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        writeln!(out, "┌{}┐", "─".repeat(width + 2))?;
        for line in &lines {
            let pad = width - line.chars().count();
            writeln!(out, "│ {}{} │", line, " ".repeat(pad))?;
        }
        writeln!(out, "└{}┘", "─".repeat(width + 2))
    }

    /// 構造値を 2 スペースインデントで整形し、トークン種別ごとに着色する
    fn write_json(&self, value: &Value, indent: usize, out: &mut dyn Write) -> io::Result<()> {
        let pad = "  ".repeat(indent);
        match value {
            Value::Null => write!(out, "{}", self.paint(MAGENTA, "null")),
            Value::Bool(b) => write!(out, "{}", self.paint(MAGENTA, &b.to_string())),
            Value::Number(n) => write!(out, "{}", self.paint(YELLOW, &n.to_string())),
            Value::String(s) => {
                let quoted = serde_json::to_string(s).unwrap_or_default();
                write!(out, "{}", self.paint(GREEN, &quoted))
            }
            Value::Array(items) => {
                if items.is_empty() {
                    return write!(out, "[]");
                }
                writeln!(out, "[")?;
                for (i, item) in items.iter().enumerate() {
                    write!(out, "{}  ", pad)?;
                    self.write_json(item, indent + 1, out)?;
                    if i + 1 < items.len() {
                        write!(out, ",")?;
                    }
                    writeln!(out)?;
                }
                write!(out, "{}]", pad)
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return write!(out, "{{}}");
                }
                writeln!(out, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    let quoted = serde_json::to_string(key).unwrap_or_default();
                    write!(out, "{}  {}: ", pad, self.paint(CYAN, &quoted))?;
                    self.write_json(item, indent + 1, out)?;
                    if i + 1 < map.len() {
                        write!(out, ",")?;
                    }
                    writeln!(out)?;
                }
                write!(out, "{}}}", pad)
            }
        }
    }
}

/// 空白区切りで width 文字以内に折り返す。width を超える単語は分割しない
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
