//! 履歴レコードのドメイン型
//!
//! 1 回のプロンプト/レスポンス交換を 1 レコードとして保持する。
//! `full_response` は「JSON として解釈できた構造値」か「生テキスト」の
//! タグ付き和で、利用側は必ず分岐して扱う（後から推測で再パースしない）。

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// full_response の保存表現
///
/// ディスク上ではタグを JSON の形そのもので運ぶ: 文字列なら生テキスト、
/// それ以外（オブジェクト・配列・数値など）なら構造値。
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// JSON として解釈できたレスポンス本体
    Structured(Value),
    /// JSON でなかった生テキスト（トランスポート異常・非準拠バックエンド）
    Text(String),
}

impl ResponsePayload {
    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn is_structured(&self) -> bool {
        matches!(self, ResponsePayload::Structured(_))
    }
}

impl Serialize for ResponsePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponsePayload::Structured(v) => v.serialize(serializer),
            ResponsePayload::Text(t) => serializer.serialize_str(t),
        }
    }
}

impl<'de> Deserialize<'de> for ResponsePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        Ok(match v {
            Value::String(s) => ResponsePayload::Text(s),
            other => ResponsePayload::Structured(other),
        })
    }
}

/// 記録済みの 1 交換
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 記録時刻（UTC、ISO-8601、秒精度）。append 時にストアが付与する
    pub timestamp: String,
    pub model: String,
    pub prompt: String,
    pub full_response: ResponsePayload,
    /// append 時に導出したテキスト回答（無ければ空文字列）
    #[serde(default)]
    pub text_response: String,
}
