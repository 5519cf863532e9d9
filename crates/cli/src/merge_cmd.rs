//! `plens merge` — config-driven receipt section merging.

use std::path::PathBuf;

use clap::Subcommand;

use pricelens_merge::engine::{load_section_records, merge_with_summary};
use pricelens_merge::model::{ExtractedPriceRecord, MergeReport};
use pricelens_merge::MergeConfig;

use crate::exit_codes::{EXIT_MERGE_INVALID_CONFIG, EXIT_MERGE_RUNTIME};
use crate::CliError;

#[derive(Subcommand)]
pub enum MergeCommands {
    /// Run a merge from a TOML config file
    #[command(after_help = "\
Examples:
  plens merge run receipt.merge.toml
  plens merge run receipt.merge.toml --json
  plens merge run receipt.merge.toml --output merged.json
  plens merge run receipt.merge.toml --csv merged.csv")]
    Run {
        /// Path to the .merge.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON report to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write surviving line-items as CSV to file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Validate a merge config without running
    #[command(after_help = "\
Examples:
  plens merge validate receipt.merge.toml")]
    Validate {
        /// Path to the .merge.toml config file
        config: PathBuf,
    },
}

pub fn cmd_merge(cmd: MergeCommands) -> Result<(), CliError> {
    match cmd {
        MergeCommands::Run { config, json, output, csv } => {
            cmd_merge_run(config, json, output, csv)
        }
        MergeCommands::Validate { config } => cmd_merge_validate(config),
    }
}

fn merge_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn cmd_merge_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
        merge_err(EXIT_MERGE_RUNTIME, format!("cannot read config: {e}"))
            .with_hint(format!("expected a merge config at {}", config_path.display()))
    })?;

    let config = MergeConfig::from_toml(&config_str)
        .map_err(|e| merge_err(EXIT_MERGE_INVALID_CONFIG, e.to_string()))?;

    // Resolve section files relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| std::path::Path::new("."));

    let mut sections: Vec<Vec<ExtractedPriceRecord>> = Vec::with_capacity(config.sections.len());
    for file in &config.sections {
        let path = base_dir.join(file);
        let json_data = std::fs::read_to_string(&path).map_err(|e| {
            merge_err(EXIT_MERGE_RUNTIME, format!("cannot read {}: {e}", path.display()))
        })?;
        let records = load_section_records(file, &json_data)
            .map_err(|e| merge_err(EXIT_MERGE_RUNTIME, e.to_string()))?;
        sections.push(records);
    }

    // Run engine
    let (result, summary) = merge_with_summary(&config, &sections);
    let report = MergeReport::new(&config, summary, result);

    // Output
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| merge_err(EXIT_MERGE_RUNTIME, format!("JSON serialization error: {e}")))?;

    let output_file = output_file.or_else(|| {
        config.output.json.as_ref().map(|p| base_dir.join(p))
    });
    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| merge_err(EXIT_MERGE_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(ref path) = csv_file {
        crate::export::write_prices_csv(path, &report.result.prices)
            .map_err(|e| merge_err(EXIT_MERGE_RUNTIME, format!("cannot write CSV: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{} policy merge: {} section(s), {} record(s) in — {} surviving, {} dropped, {} replaced by confidence, aggregate confidence {:.2}",
        report.meta.policy,
        s.sections,
        s.input_records,
        s.surviving,
        s.duplicates_dropped,
        s.replaced_by_confidence,
        report.result.aggregate_confidence,
    );

    Ok(())
}

fn cmd_merge_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| merge_err(EXIT_MERGE_RUNTIME, format!("cannot read config: {e}")))?;

    let config = MergeConfig::from_toml(&config_str)
        .map_err(|e| merge_err(EXIT_MERGE_INVALID_CONFIG, e.to_string()))?;

    eprintln!(
        "ok: '{}' — {} policy, {} section file(s)",
        config.name,
        config.policy,
        config.sections.len()
    );
    Ok(())
}
