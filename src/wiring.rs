//! 配線: 標準アダプタで UseCase を組み立てる

use std::io::IsTerminal;
use std::sync::Arc;

use crate::adapter::{
    FileJsonLog, JsonHistoryStore, StdClock, StdEnvResolver, StdFileSystem, TermRenderer,
};
use crate::config::{GqConfig, DEFAULT_MODEL, HISTORY_FILE_NAME, LOG_FILE_NAME};
use crate::domain::ModelName;
use crate::error::Error;
use crate::llm::GeminiApi;
use crate::ports::outbound::{Clock, EnvResolver, FileSystem, HistoryStore, LlmApi, Log, LogLevel};
use crate::usecase::{GqDeps, GqUseCase};

pub struct App {
    pub use_case: GqUseCase,
    pub log: Arc<dyn Log>,
}

/// 配線: 標準アダプタで GqUseCase を組み立てる
pub fn wire_gq(verbose: bool) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let env_resolver = StdEnvResolver;

    let home = env_resolver.resolve_home_dir()?;
    let config = GqConfig::load(fs.as_ref(), &home);

    let min_level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log: Arc<dyn Log> = Arc::new(FileJsonLog::new(
        Arc::clone(&fs),
        home.join(LOG_FILE_NAME),
        min_level,
    ));

    let history_path = config
        .history_file
        .clone()
        .unwrap_or_else(|| home.join(HISTORY_FILE_NAME));
    let store: Arc<dyn HistoryStore> = Arc::new(JsonHistoryStore::new(
        Arc::clone(&fs),
        Arc::clone(&clock),
        Arc::clone(&log),
        history_path,
    ));

    let api_key = config
        .api_key
        .clone()
        .or_else(|| env_resolver.api_key_from_env());
    let api: Arc<dyn LlmApi> = Arc::new(GeminiApi::new(api_key));

    let default_model = ModelName::new(
        config
            .default_model
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
    );
    let renderer = TermRenderer::new(std::io::stdout().is_terminal());

    Ok(App {
        use_case: GqUseCase::new(GqDeps {
            store,
            api,
            renderer,
            log: Arc::clone(&log),
            default_model,
        }),
        log,
    })
}
