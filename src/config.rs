//! config.json の設定型
//!
//! すべて省略可能。ファイルが無ければデフォルト、壊れていれば警告して
//! デフォルトで続行する（設定の不備で履歴表示まで止めない）。

use crate::domain::HomeDir;
use crate::ports::outbound::FileSystem;
use serde::Deserialize;
use std::path::PathBuf;

/// モデル未指定時のデフォルト
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// ホームディレクトリ配下のファイル名
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const HISTORY_FILE_NAME: &str = "history.json";
pub const LOG_FILE_NAME: &str = "gq.log.jsonl";

/// 解決済みの設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GqConfig {
    /// API キー（無ければ GEMINI_API_KEY 環境変数を使う）
    pub api_key: Option<String>,
    /// モデル未指定時に使うモデル名
    pub default_model: Option<String>,
    /// 履歴ファイルの置き場所の上書き
    pub history_file: Option<PathBuf>,
}

/// serde 用の内部構造
#[derive(Debug, Deserialize)]
struct GqConfigRaw {
    api_key: Option<String>,
    #[serde(alias = "model")]
    default_model: Option<String>,
    history_file: Option<String>,
}

impl GqConfig {
    /// JSON 文字列からパース（ファイル読みは load で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: GqConfigRaw = serde_json::from_str(json)?;
        Ok(GqConfig {
            api_key: raw.api_key,
            default_model: raw.default_model,
            history_file: raw.history_file.map(PathBuf::from),
        })
    }

    /// `<home>/config.json` を読む。無ければデフォルト、壊れていれば警告してデフォルト
    pub fn load(fs: &dyn FileSystem, home: &HomeDir) -> Self {
        let path = home.join(CONFIG_FILE_NAME);
        if !fs.exists(&path) {
            return GqConfig::default();
        }
        let content = match fs.read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: {}", e);
                return GqConfig::default();
            }
        };
        match Self::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse '{}', using defaults: {}",
                    path.display(),
                    e
                );
                GqConfig::default()
            }
        }
    }
}
