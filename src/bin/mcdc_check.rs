//! CLI entry point: finds decisions whose branch coverage does not imply
//! masking MC/DC, across a set of files and directories (§6).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mcdc_check::analysis::analyze_paths;
use mcdc_check::config::AnalysisConfig;
use mcdc_check::error::AnalysisError;
use mcdc_check::report::{build_report, MultiFileReport, Summary};
use mcdc_check::tree_checker::Classification;

/// Finds compound boolean decisions whose branch coverage does not imply
/// masking MC/DC.
#[derive(Parser, Debug)]
#[command(name = "mcdc-check")]
struct Cli {
    /// Files or directories to analyze; directories are scanned recursively
    /// for `.swift` files.
    paths: Vec<PathBuf>,

    /// Emit the structured JSON report instead of plain text.
    #[arg(long)]
    json: bool,

    /// Print only the aggregate summary.
    #[arg(long)]
    summary: bool,

    /// Maximum decision arity considered for the reorder search.
    #[arg(long = "max-reorder-vars", default_value_t = 5)]
    max_reorder_vars: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.paths.is_empty() {
        eprintln!("mcdc-check: no input paths given");
        return ExitCode::from(2);
    }

    let config = AnalysisConfig { max_reorder_variables: cli.max_reorder_vars, ..AnalysisConfig::default() };

    let (files, errors) = analyze_paths(&cli.paths, &config);
    let mut had_io_error = false;
    for (path, error) in &errors {
        match error {
            AnalysisError::Parse { .. } => log::warn!("{}: {}", path.display(), error),
            AnalysisError::Io { .. } => {
                log::error!("{}: {}", path.display(), error);
                had_io_error = true;
            }
        }
    }

    if files.is_empty() && !errors.is_empty() {
        return ExitCode::from(1);
    }

    let report = build_report(files);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("mcdc-check: failed to serialize report: {e}");
                return ExitCode::from(1);
            }
        }
    } else if cli.summary {
        print_summary(&report.summary);
    } else {
        print_full(&report);
    }

    // Parse errors are recoverable per §7 and don't affect the exit code;
    // an I/O error means a requested file was never analyzed at all.
    if had_io_error {
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn print_summary(summary: &Summary) {
    println!("files analyzed:         {}", summary.files_analyzed);
    println!("functions:              {}", summary.total_functions);
    println!("functions w/ decisions: {}", summary.functions_with_decisions);
    println!("decisions:              {}", summary.total_decisions);
    println!("  tree:                 {}", summary.tree_decisions);
    println!("  correctable:          {}", summary.correctable_decisions);
    println!("  non-correctable:      {}", summary.non_correctable_decisions);
}

fn print_full(report: &MultiFileReport) {
    for file in &report.files {
        for func in &file.functions {
            for (i, decision) in func.decisions.iter().enumerate() {
                if matches!(decision.classification, Classification::Tree) {
                    continue;
                }
                let suggestion = decision
                    .suggested_order
                    .as_ref()
                    .map(|order| format!(", suggested order {order:?}"))
                    .unwrap_or_default();
                println!(
                    "{}:{} {} decision #{i}: {:?} (order {:?}{suggestion})",
                    file.path, func.line, func.name, decision.classification, decision.original_order,
                );
            }
        }
    }
    println!();
    print_summary(&report.summary);
}
