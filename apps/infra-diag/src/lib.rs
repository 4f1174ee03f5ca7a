//! infra-diag core library.
//!
//! Validates a directory of infrastructure agent integration configs in two
//! stages (YAML syntax, then the integrations schema) and reports every
//! failing file with the stage it failed at.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `collect`: Recursive discovery of candidate files.
//! - `config`: Agent configuration loading and plugin dir resolution.
//! - `error`: Traversal, configuration, and per-stage error types.
//! - `logging`: `tracing` subscriber setup.
//! - `models`: Outcomes, the aggregate report, and the integration schema.
//! - `output`: Human/JSON printers for reports.
//! - `parse`: The generic and schema decoding stages.
//! - `validate`: The pipeline tying the above together.
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parse;
pub mod validate;

pub use models::{Outcome, Stage, Summary, ValidationOutcome, ValidationReport};
pub use validate::{validate_path, validate_path_with, ValidateOptions};
