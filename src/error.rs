//! エラーハンドリング
//!
//! プロセス全体で使うエラー型。終了コードへの変換は main に集約する。

/// エラー型
///
/// ストア層の失敗はストア内で回復するため、ここに来るのは
/// 通信失敗・空レスポンス・上流 API エラー・引数不正など呼び出しを中断するものだけ。
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage 表示の対象）
    #[error("{0}")]
    InvalidArgument(String),
    /// ファイル I/O エラー
    #[error("{0}")]
    Io(String),
    /// JSON の生成・解釈エラー
    #[error("{0}")]
    Json(String),
    /// HTTP トランスポートエラー（レスポンスが得られなかった）
    #[error("{0}")]
    Http(String),
    /// 環境変数・設定の解決エラー
    #[error("{0}")]
    Env(String),
    /// 上流 API が構造化エラーを返した（履歴には記録済み）
    #[error("Gemini API error: {0}")]
    Upstream(String),
    /// 本文が空のレスポンス
    #[error("Empty response from API")]
    EmptyResponse,
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Error::Upstream(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// プロセスの終了コード。失敗はすべて 1（成功は呼び出し側の 0）。
    pub fn exit_code(&self) -> i32 {
        1
    }
}
