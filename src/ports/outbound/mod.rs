//! Outbound ポート
//!
//! usecase と adapter の境界。副作用はすべてここの trait 経由で行う。

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod history_store;
pub mod llm;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
pub use history_store::HistoryStore;
pub use llm::LlmApi;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
