//! テスト用: ネットワークに出ず、固定形のレスポンスを返す LlmApi 実装


#[cfg(test)]
pub use stub::EchoApi;
