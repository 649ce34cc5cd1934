//! 環境変数解決の Outbound ポート

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数からパス・認証情報を解決する抽象
///
/// 実装は `adapter::StdEnvResolver` やテスト用の固定値など。
pub trait EnvResolver: Send + Sync {
    /// 設定・履歴・ログを置くホームディレクトリを解決する
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// 環境変数から API キーを読む（設定ファイルに無い場合のフォールバック）
    fn api_key_from_env(&self) -> Option<String>;
}
