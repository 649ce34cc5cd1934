//! 時刻取得の Outbound ポート
//!
//! レコードのタイムスタンプは append 時にここから取る。テストでは固定時刻に差し替える。

use chrono::{DateTime, Utc};

/// 時刻取得の抽象
pub trait Clock: Send + Sync {
    /// 現在の UTC 時刻
    fn now_utc(&self) -> DateTime<Utc>;
}
