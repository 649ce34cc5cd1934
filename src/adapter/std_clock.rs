//! 標準時刻実装（chrono::Utc を委譲）

use crate::ports::outbound::Clock;
use chrono::{DateTime, Utc};

/// システム時計をそのまま返す Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
