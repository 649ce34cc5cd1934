//! レスポンス分類と派生値の抽出
//!
//! 生のレスポンス本文を一度だけ分類し、以後はタグで分岐する。
//! 抽出関数はすべて純粋で、パスが欠けていても失敗しない（欠落は正常系）。

use serde_json::Value;

/// 分類済みレスポンス
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResponse {
    /// 整形式の JSON としてパースできた
    StructuredSuccess(Value),
    /// JSON ではなかった生テキスト
    Opaque(String),
}

/// 生のレスポンス本文を分類する。失敗しない。
pub fn classify(raw: &str) -> ClassifiedResponse {
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => ClassifiedResponse::StructuredSuccess(v),
        Err(_) => ClassifiedResponse::Opaque(raw.to_string()),
    }
}

/// 構造値から回答テキストを抽出する
///
/// パス: `candidates[0].content.parts[0].text`。
/// どこかが欠けていれば空文字列（エラーにはしない）。
pub fn extract_text(v: &Value) -> String {
    v["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string()
}

/// トークン使用量（各フィールドは欠落し得る。0 で埋めない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub response_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// 構造値から `usageMetadata` 配下のトークン数を抽出する
pub fn extract_usage(v: &Value) -> TokenUsage {
    let u = &v["usageMetadata"];
    TokenUsage {
        prompt_tokens: u["promptTokenCount"].as_u64(),
        response_tokens: u["candidatesTokenCount"].as_u64(),
        total_tokens: u["totalTokenCount"].as_u64(),
    }
}

/// 構造値が上流 API のエラーペイロードならメッセージを返す
pub fn upstream_error(v: &Value) -> Option<String> {
    let error = v.get("error")?;
    Some(
        error["message"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string(),
    )
}

/// 不透明レスポンスの text_response 用プレビュー
///
/// 先頭 1000 バイト（文字境界に切り詰め）から NUL を除いたもの。
pub fn opaque_preview(raw: &str) -> String {
    const PREVIEW_BYTES: usize = 1000;
    let mut end = PREVIEW_BYTES.min(raw.len());
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw[..end].replace('\0', "")
}
