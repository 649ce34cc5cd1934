//! ファイルへ JSONL で追記する Log 実装
//!
//! ログの出力先はファイルのみ。エラー時のコンソール表示（stderr）とは別。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::Path;
use std::sync::Arc;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: std::path::PathBuf,
    /// このレベルより低い（数値的に大きい）レコードは捨てる
    min_level: LogLevel,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>, min_level: LogLevel) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
            min_level,
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.min_level {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut w = self.fs.open_append(&self.path)?;
        let line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
        use std::io::Write;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.write_all(b"\n").map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::ports::outbound::now_iso8601;

    fn record(level: LogLevel, message: &str) -> LogRecord {
        LogRecord {
            ts: now_iso8601(),
            level,
            message: message.to_string(),
            layer: None,
            kind: None,
            fields: None,
        }
    }

    #[test]
    fn test_noop_log() {
        let log = NoopLog;
        assert!(log.log(&record(LogLevel::Info, "test")).is_ok());
    }

    #[test]
    fn test_file_json_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("gq.log.jsonl");
        let log = FileJsonLog::new(Arc::new(StdFileSystem), &path, LogLevel::Info);

        log.log(&record(LogLevel::Info, "first")).unwrap();
        log.log(&record(LogLevel::Warn, "second")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"first\""));
        assert!(lines[1].contains("\"level\":\"warn\""));
    }

    #[test]
    fn test_file_json_log_filters_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gq.log.jsonl");
        let log = FileJsonLog::new(Arc::new(StdFileSystem), &path, LogLevel::Info);

        log.log(&record(LogLevel::Debug, "dropped")).unwrap();
        assert!(!path.exists());

        log.log(&record(LogLevel::Error, "kept")).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"kept\""));
        assert!(!content.contains("\"dropped\""));
    }
}
