// PriceLens CLI - headless receipt merge operations

mod exit_codes;
mod export;
mod merge_cmd;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;
use merge_cmd::MergeCommands;

#[derive(Parser)]
#[command(name = "plens")]
#[command(about = "Receipt line-item merge & deduplication runner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge OCR-scanned receipt sections into one deduplicated list
    Merge {
        #[command(subcommand)]
        command: MergeCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: plens <command> [options]");
            eprintln!("       plens --help for more information");
            Ok(())
        }
        Some(Commands::Merge { command }) => merge_cmd::cmd_merge(command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
