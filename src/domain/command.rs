//! CLI から組み立てるコマンドのドメイン型

use crate::domain::{ModelName, Prompt};

/// 1 回の起動で実行するコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum GqCommand {
    Help,
    /// 保存済み履歴を表示して終了
    ViewLog,
    /// 保存済み履歴を空にして終了
    ClearLog,
    /// プロンプトを API に送り、回答を表示して履歴に記録
    Query {
        model: Option<ModelName>,
        prompt: Prompt,
    },
}
