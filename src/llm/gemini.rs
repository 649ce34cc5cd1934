//! Gemini generateContent クライアント
//!
//! プロンプトを 1 つの text part として送る。レスポンス本文は HTTP
//! ステータスに関わらずそのまま返し、エラーペイロードの解釈・記録は
//! 呼び出し側に任せる。Err はトランスポート失敗のみ。

use crate::domain::{ModelName, Prompt};
use crate::error::Error;
use crate::ports::outbound::LlmApi;
use serde_json::{json, Value};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API クライアント
pub struct GeminiApi {
    api_key: Option<String>,
}

impl GeminiApi {
    /// API キーは設定 + 環境変数から解決済みの値を受け取る。
    /// None のまま generate を呼ぶとエラー（履歴表示などキー不要の操作を妨げない）。
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn request_payload(prompt: &Prompt) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt.as_ref()}]
            }]
        })
    }
}

impl LlmApi for GeminiApi {
    fn generate(&self, model: &ModelName, prompt: &Prompt) -> Result<String, Error> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::env("GEMINI_API_KEY is not set (set it, or put api_key in config.json)")
        })?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL,
            model.as_ref(),
            api_key
        );
        let request_json = serde_json::to_string(&Self::request_payload(prompt))
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(request_json)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))
    }
}
