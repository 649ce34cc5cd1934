use crate::domain::{GqCommand, ModelName, Prompt};
use crate::error::Error;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --view-log: 保存済み履歴を表示して終了
    pub view_log: bool,
    /// --clear-log: 保存済み履歴を空にして終了
    pub clear_log: bool,
    /// -v / --verbose: debug レベルのレコードもログファイルへ出す
    pub verbose: bool,
    pub model: Option<ModelName>,
    pub prompt_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("gq")
        .about("Send a prompt to the Gemini API and keep a bounded exchange log")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("view-log")
                .long("view-log")
                .help("Show the saved conversation history")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("clear-log")
                .long("clear-log")
                .help("Clear the saved conversation history")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gemini-2.0-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit verbose debug records to the log file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("prompt")
                .index(1)
                .help("Prompt words (joined with spaces)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        view_log: matches.get_flag("view-log"),
        clear_log: matches.get_flag("clear-log"),
        verbose: matches.get_flag("verbose"),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        prompt_args: matches
            .get_many::<String>("prompt")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// Config を GqCommand に変換する
pub fn config_to_command(config: Config) -> GqCommand {
    if config.help {
        return GqCommand::Help;
    }
    if config.view_log {
        return GqCommand::ViewLog;
    }
    if config.clear_log {
        return GqCommand::ClearLog;
    }
    GqCommand::Query {
        model: config.model,
        prompt: Prompt::new(config.prompt_args.join(" ")),
    }
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let opts = "-h --help --view-log --clear-log -m --model -v --verbose --generate";
    match shell {
        Shell::Bash => {
            println!(
                r#"# Fallback completion for gq
_gq() {{
  local cur="${{COMP_WORDS[COMP_CWORD]}}"
  COMPREPLY=($(compgen -W "{opts}" -- "$cur"))
}}
complete -F _gq gq
"#,
                opts = opts
            );
        }
        Shell::Zsh => {
            println!(
                r#"# Fallback completion for gq
#compdef gq
local -a reply
reply=({opts})
_describe 'gq' reply
"#,
                opts = opts
            );
        }
        Shell::Fish => {
            println!(
                r#"# Fallback completion for gq
complete -c gq -l help -s h -d "Show help"
complete -c gq -l view-log -d "Show the saved history"
complete -c gq -l clear-log -d "Clear the saved history"
complete -c gq -l model -s m -d "Model name" -r
complete -c gq -l verbose -s v -d "Verbose log records"
complete -c gq -l generate -d "Generate completion script" -r -a "bash zsh fish"
"#
            );
        }
        _ => {}
    }
}
