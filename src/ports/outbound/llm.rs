//! 生成 API 呼び出しの Outbound ポート

use crate::domain::{ModelName, Prompt};
use crate::error::Error;

/// 生成言語 API の抽象
///
/// レスポンス本文が得られた場合は HTTP ステータスに関わらず生の本文を返す
/// （上流のエラーペイロードも本文として扱い、解釈は呼び出し側が行う）。
/// Err はトランスポート失敗（レスポンスが得られなかった）のみ。
pub trait LlmApi: Send + Sync {
    fn generate(&self, model: &ModelName, prompt: &Prompt) -> Result<String, Error>;
}
