//! gq のユースケース（アダプター経由で I/O を行う）
//!
//! 1 回の問い合わせサイクル: API 呼び出し → 分類 → 記録 → 回答表示。
//! 記録の失敗は回答表示を妨げない（警告して続行）。

use crate::adapter::TermRenderer;
use crate::domain::{classify, extract_text, upstream_error};
use crate::domain::{ClassifiedResponse, ModelName, Prompt};
use crate::error::Error;
use crate::ports::outbound::{now_iso8601, HistoryStore, LlmApi, Log, LogLevel, LogRecord};
use std::io::Write;
use std::sync::Arc;

pub struct GqDeps {
    pub store: Arc<dyn HistoryStore>,
    pub api: Arc<dyn LlmApi>,
    pub renderer: TermRenderer,
    pub log: Arc<dyn Log>,
    pub default_model: ModelName,
}

/// gq のユースケース
pub struct GqUseCase {
    deps: GqDeps,
}

impl GqUseCase {
    pub fn new(deps: GqDeps) -> Self {
        Self { deps }
    }

    fn warn(&self, message: String) {
        eprintln!("Warning: {}", message);
        let _ = self.deps.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Warn,
            message,
            layer: Some("usecase".to_string()),
            kind: Some("store".to_string()),
            fields: None,
        });
    }

    /// 1 回の問い合わせを実行する
    ///
    /// トランスポート失敗・空レスポンスは記録せずエラーで返す。
    /// 上流 API のエラーペイロードは記録した上でエラーで返す。
    pub fn run_query(&self, model: Option<ModelName>, prompt: &Prompt) -> Result<i32, Error> {
        if prompt.trim().is_empty() {
            return Err(Error::invalid_argument(
                "No prompt provided. Pass prompt words, or use --view-log / --clear-log.",
            ));
        }
        let model = model.unwrap_or_else(|| self.deps.default_model.clone());

        let mut fields = std::collections::BTreeMap::new();
        fields.insert("model".to_string(), serde_json::json!(model.as_ref()));
        let _ = self.deps.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: format!("query started (model: {})", model),
            layer: Some("usecase".to_string()),
            kind: Some("query".to_string()),
            fields: Some(fields),
        });

        // トランスポート失敗・空レスポンスはストアに一切触れずに抜ける
        let raw = self.deps.api.generate(&model, prompt)?;
        if raw.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }
        let _ = self.deps.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Debug,
            message: format!("response received ({} bytes)", raw.len()),
            layer: Some("usecase".to_string()),
            kind: Some("query".to_string()),
            fields: None,
        });

        // 壊れた履歴ファイルはここで空ログへ戻しておく（失敗しても続行）
        if let Err(e) = self.deps.store.initialize() {
            self.warn(format!("Failed to initialize history store: {}", e));
        }
        // 上流のエラーペイロードも含めて記録する。記録失敗は回答表示を妨げない
        if let Err(e) = self.deps.store.append(&model, prompt, &raw) {
            self.warn(format!("Failed to record exchange: {}", e));
        }

        match classify(&raw) {
            ClassifiedResponse::StructuredSuccess(v) => {
                if let Some(message) = upstream_error(&v) {
                    return Err(Error::upstream(message));
                }
                let text = extract_text(&v);
                if text.is_empty() {
                    eprintln!("gq: no text in response");
                } else {
                    println!("{}", text);
                }
                Ok(0)
            }
            ClassifiedResponse::Opaque(s) => {
                eprintln!("gq: response was not valid JSON; raw text follows");
                println!("{}", s.trim_end_matches('\n'));
                Ok(0)
            }
        }
    }

    /// 保存済み履歴を out へ描画する。ファイルが無い・空でも成功
    pub fn view_log(&self, out: &mut dyn Write) -> Result<i32, Error> {
        let records = self.deps.store.load()?;
        self.deps
            .renderer
            .render(&records, out)
            .map_err(|e| Error::io_msg(format!("Failed to render history: {}", e)))?;
        Ok(0)
    }

    /// 保存済み履歴を無条件で空にする
    pub fn clear_log(&self) -> Result<i32, Error> {
        self.deps.store.clear()?;
        println!("History cleared.");
        Ok(0)
    }
}
