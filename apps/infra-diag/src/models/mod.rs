//! Shared data models: per-file outcomes, the aggregate report, and the
//! integration configuration schema validated against.

pub mod fields;
pub mod integration;

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Validation stage a file failed at.
pub enum Stage {
    Read,
    Syntax,
    Schema,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Syntax => "syntax",
            Stage::Schema => "schema",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
/// Terminal state of one file.
pub enum Outcome {
    Passed,
    Failed { stage: Stage, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of validating a single candidate file.
pub struct ValidationOutcome {
    pub file: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ValidationOutcome {
    pub fn passed(file: PathBuf) -> Self {
        Self {
            file,
            outcome: Outcome::Passed,
        }
    }

    pub fn failed(file: PathBuf, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            file,
            outcome: Outcome::Failed {
                stage,
                message: message.into(),
            },
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    /// Stage the file failed at, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match &self.outcome {
            Outcome::Passed => None,
            Outcome::Failed { stage, .. } => Some(*stage),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Outcome counts used by printers.
pub struct Summary {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
    pub read_errors: usize,
    pub syntax_errors: usize,
    pub schema_errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregate result of one validation run.
pub struct ValidationReport {
    pub root: PathBuf,
    pub passed: bool,
    pub outcomes: Vec<ValidationOutcome>,
    pub summary: Summary,
}

impl ValidationReport {
    /// Build the report, deriving the verdict and counts from `outcomes`.
    /// The run passes only when every outcome passed; an empty run passes.
    pub fn from_outcomes(root: &Path, outcomes: Vec<ValidationOutcome>) -> Self {
        let mut summary = Summary {
            files: outcomes.len(),
            ..Summary::default()
        };
        for o in &outcomes {
            match o.failed_stage() {
                None => summary.passed += 1,
                Some(stage) => {
                    summary.failed += 1;
                    match stage {
                        Stage::Read => summary.read_errors += 1,
                        Stage::Syntax => summary.syntax_errors += 1,
                        Stage::Schema => summary.schema_errors += 1,
                    }
                }
            }
        }
        Self {
            root: root.to_path_buf(),
            passed: summary.failed == 0,
            outcomes,
            summary,
        }
    }

    /// Outcomes that did not pass, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_passed())
    }
}
