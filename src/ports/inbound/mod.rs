//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use crate::error::Error;

/// gq アプリケーションを実行する Inbound ポート
///
/// main/cli はこの trait を実装した型の run を呼び出す。
pub trait RunGqApp {
    fn run(&self, config: Config) -> Result<i32, Error>;
}
