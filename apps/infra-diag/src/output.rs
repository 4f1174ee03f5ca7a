//! Report rendering for the validate command.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! serialized `ValidationReport`: verdict, per-file outcomes, and summary.

use crate::models::{Outcome, ValidationReport};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::path::Path;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
/// How the report is printed on stdout.
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && std::env::var_os("NO_COLOR").is_none()
}

/// Print a validation report in the requested format.
pub fn print_report(rep: &ValidationReport, output: OutputMode) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&compose_report_json(rep)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("failed to render report: {}", e),
        },
        OutputMode::Human => {
            for line in compose_report_lines(rep, use_colors(output)) {
                println!("{}", line);
            }
        }
    }
}

/// Human-readable lines: one per failing file, then the summary.
pub fn compose_report_lines(rep: &ValidationReport, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for o in rep.failures() {
        let Outcome::Failed { stage, message } = &o.outcome else {
            continue;
        };
        let file = display_rel(&o.file, &rep.root);
        let tag = format!("⟦{}⟧", stage.as_str());
        if color {
            lines.push(format!(
                "{} {} {} — {}",
                "✖".red(),
                tag.red().bold(),
                file.bold(),
                message
            ));
        } else {
            lines.push(format!("✖ {} {} — {}", tag, file, message));
        }
    }
    let s = &rep.summary;
    let verdict = if rep.passed { "passed" } else { "failed" };
    let summary = format!(
        "— Summary — {} files={} passed={} failed={} (read={} syntax={} schema={})",
        verdict, s.files, s.passed, s.failed, s.read_errors, s.syntax_errors, s.schema_errors
    );
    if !color {
        lines.push(summary);
    } else if rep.passed {
        lines.push(summary.green().bold().to_string());
    } else {
        lines.push(summary.red().bold().to_string());
    }
    lines
}

/// Path of `file` relative to the validated root; the full path when the
/// root is the file itself.
fn display_rel(file: &Path, root: &Path) -> String {
    match pathdiff::diff_paths(file, root) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        _ => file.to_string_lossy().to_string(),
    }
}

/// Compose the report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(rep: &ValidationReport) -> JsonVal {
    serde_json::to_value(rep).unwrap_or(JsonVal::Null)
}
