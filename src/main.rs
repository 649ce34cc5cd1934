mod adapter;
mod cli;
mod config;
mod domain;
mod error;
mod llm;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::GqCommand;
use error::Error;
use ports::inbound::RunGqApp;
use ports::outbound::{now_iso8601, LogLevel, LogRecord};
use wiring::{wire_gq, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl RunGqApp for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                Some(m)
            },
        });

        let result = match cmd {
            GqCommand::Help => {
                print_help();
                Ok(0)
            }
            GqCommand::ViewLog => {
                let stdout = std::io::stdout();
                self.app.use_case.view_log(&mut stdout.lock())
            }
            GqCommand::ClearLog => self.app.use_case.clear_log(),
            GqCommand::Query { model, prompt } => self.app.use_case.run_query(model, &prompt),
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command finished".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                m.insert("exit_code".to_string(), serde_json::json!(code));
                Some(m)
            },
        });
        if let Err(ref e) = result {
            let _ = self.app.log.log(&LogRecord {
                ts: now_iso8601(),
                level: LogLevel::Error,
                message: e.to_string(),
                layer: Some("cli".to_string()),
                kind: Some("error".to_string()),
                fields: None,
            });
        }
        result
    }
}

fn cmd_name_for_log(cmd: &GqCommand) -> &'static str {
    match cmd {
        GqCommand::Help => "help",
        GqCommand::ViewLog => "view-log",
        GqCommand::ClearLog => "clear-log",
        GqCommand::Query { .. } => "query",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("gq: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_gq(config.verbose)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: gq [options] [prompt...]");
}

fn print_help() {
    println!("Usage: gq [options] [prompt...]");
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  --view-log             Show the saved conversation history and exit");
    println!("  --clear-log            Clear the saved conversation history and exit");
    println!("  -m, --model <model>    Specify model name. Default: default_model from config.json, or gemini-2.0-flash");
    println!("  -v, --verbose          Emit verbose debug records to the log file");
    println!("  --generate <shell>     Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY   API key, used when config.json has no api_key");
    println!("  GQ_HOME          Config/history directory. If unset, $XDG_CONFIG_HOME/gq (e.g. ~/.config/gq) is used.");
    println!();
    println!("Description:");
    println!("  Send a prompt to the Gemini API, print the answer, and append the");
    println!("  exchange to a bounded history log (last 50 exchanges).");
    println!();
    println!("Examples:");
    println!("  gq Hello, how are you?");
    println!("  gq -m gemini-2.5-pro What is Rust programming language?");
    println!("  gq --view-log");
}
