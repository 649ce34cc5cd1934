//! 単一 JSON ドキュメントによる履歴ストア
//!
//! レコード配列（新しい順）を 1 ファイルに丸ごと読み書きする。行単位の
//! 追記はしない。プロセス間ロックは持たず、read-modify-write の競合で
//! 片方の append が失われることは許容する。ただし書き込みは必ず
//! 一時ファイル + rename で行い、途中状態のファイルは読者に見せない。

use crate::domain::{classify, extract_text, opaque_preview};
use crate::domain::{ClassifiedResponse, ModelName, Prompt, Record, ResponsePayload};
use crate::error::Error;
use crate::ports::outbound::{now_iso8601, Clock, FileSystem, HistoryStore, Log, LogLevel, LogRecord};
use chrono::SecondsFormat;
use std::path::PathBuf;
use std::sync::Arc;

/// 保持する最大レコード数。超過した分は古い側から捨てる
const MAX_ENTRIES: usize = 50;

/// 履歴ファイルを専有する HistoryStore 実装
pub struct JsonHistoryStore {
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            clock,
            log,
            path: path.into(),
        }
    }

    /// ストア層の警告。stderr と構造化ログの両方へ出す
    fn warn(&self, message: String) {
        eprintln!("Warning: {}", message);
        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Warn,
            message,
            layer: Some("adapter".to_string()),
            kind: Some("store".to_string()),
            fields: None,
        });
    }

    /// 現在のレコード列を読む。無い・空・壊れているは空として扱う（クラッシュしない）
    fn read_records(&self) -> Vec<Record> {
        let meta = match self.fs.metadata(&self.path) {
            Ok(m) => m,
            Err(_) => return Vec::new(),
        };
        if !meta.is_file() {
            self.warn(format!(
                "History path '{}' is not a regular file",
                self.path.display()
            ));
            return Vec::new();
        }
        if meta.len() == 0 {
            // 空ファイルは警告なしで空ログ扱い
            return Vec::new();
        }
        let content = match self.fs.read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                self.warn(format!("Failed to read history file: {}", e));
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Record>>(&content) {
            Ok(records) => records,
            Err(e) => {
                self.warn(format!(
                    "History file '{}' is corrupted, treating as empty: {}",
                    self.path.display(),
                    e
                ));
                Vec::new()
            }
        }
    }

    /// レコード列をドキュメントとして書き戻す（一時ファイル + rename、0600）
    fn write_records(&self, records: &[Record]) -> Result<(), Error> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|e| Error::json(format!("Failed to build history document: {}", e)))?;
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.fs.create_dir_all(&parent)?;
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("history.json");
        let tmp = parent.join(format!(".{}.tmp-{}", file_name, std::process::id()));
        self.fs.write(&tmp, &body)?;
        self.fs.set_owner_only(&tmp)?;
        if let Err(e) = self.fs.rename(&tmp, &self.path) {
            let _ = self.fs.remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }

    /// append 用のレコードを組み立てる（分類とテキスト導出はここで一度だけ）
    fn build_record(&self, model: &ModelName, prompt: &Prompt, raw_response: &str) -> Record {
        let (full_response, text_response) = match classify(raw_response) {
            ClassifiedResponse::StructuredSuccess(v) => {
                let text = extract_text(&v);
                (ResponsePayload::Structured(v), text)
            }
            ClassifiedResponse::Opaque(s) => {
                let preview = opaque_preview(&s);
                (ResponsePayload::Text(s), preview)
            }
        };
        Record {
            timestamp: self
                .clock
                .now_utc()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            model: model.as_ref().to_string(),
            prompt: prompt.as_ref().to_string(),
            full_response,
            text_response,
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn initialize(&self) -> Result<(), Error> {
        if !self.fs.exists(&self.path) {
            return self.write_records(&[]);
        }
        let content = self.fs.read_to_string(&self.path)?;
        if content.trim().is_empty() {
            // 空ファイルはそのまま空ログへ（壊れている訳ではないので警告しない）
            return self.write_records(&[]);
        }
        if serde_json::from_str::<Vec<Record>>(&content).is_err() {
            self.warn(format!(
                "History file '{}' is corrupted, resetting to an empty log",
                self.path.display()
            ));
            return self.write_records(&[]);
        }
        Ok(())
    }

    fn append(&self, model: &ModelName, prompt: &Prompt, raw_response: &str) -> Result<(), Error> {
        let record = self.build_record(model, prompt, raw_response);
        // 書く直前に読み直す（ロックなし運用での取りこぼしを最小にする）
        let mut records = self.read_records();
        records.insert(0, record);
        records.truncate(MAX_ENTRIES);
        self.write_records(&records)
    }

    fn clear(&self) -> Result<(), Error> {
        self.write_records(&[])
    }

    fn load(&self) -> Result<Vec<Record>, Error> {
        Ok(self.read_records())
    }
}
