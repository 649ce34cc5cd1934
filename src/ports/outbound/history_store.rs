//! 履歴ストア Outbound ポート

use crate::domain::{ModelName, Prompt, Record};
use crate::error::Error;

/// 会話履歴の永続ストア
///
/// ログは単一ドキュメント（新しい順のレコード配列）としてストアが専有する。
/// 実装は `adapter::JsonHistoryStore`。
pub trait HistoryStore: Send + Sync {
    /// バッキングファイルを存在・整形式の状態にする。
    /// 無ければ空ログを作成し、壊れていれば警告して空ログへ初期化する。
    fn initialize(&self) -> Result<(), Error>;

    /// 1 交換を記録する。レスポンスを分類し、タイムスタンプと派生テキストを
    /// 付与したレコードを先頭に追加して上限まで切り詰める。
    fn append(&self, model: &ModelName, prompt: &Prompt, raw_response: &str) -> Result<(), Error>;

    /// ログを無条件で空にする
    fn clear(&self) -> Result<(), Error>;

    /// 保存順（新しい順）のレコード列を返す。読み取り専用で、
    /// ファイルが無い・壊れている場合も失敗せず空列を返す。
    fn load(&self) -> Result<Vec<Record>, Error>;
}
