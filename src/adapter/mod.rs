//! 標準アダプタ（Outbound ポートの実装）

pub mod file_json_log;
pub mod json_history_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod term_render;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use json_history_store::JsonHistoryStore;
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use term_render::TermRenderer;
