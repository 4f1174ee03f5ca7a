//! Validation pipeline: collect candidate files, run the syntax and schema
//! stages on each one, and fold the outcomes into a `ValidationReport`.
//!
//! Per-file failures are recorded and never stop the run. Only a traversal
//! failure aborts, since no complete report can be produced without the
//! file list.

use crate::collect::collect_files;
use crate::error::{StageError, TraversalError};
use crate::models::integration::IntegrationsConfig;
use crate::models::{Stage, ValidationOutcome, ValidationReport};
use crate::parse::{parse_document, parse_schema};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span};

#[derive(Debug, Clone, Copy, Default)]
/// Knobs for a validation run.
pub struct ValidateOptions {
    /// Validate files on the rayon pool. Report order is unchanged.
    pub parallel: bool,
}

/// Validate every file under `root` against the integrations schema.
pub fn validate_path(
    root: &Path,
    opts: &ValidateOptions,
) -> Result<ValidationReport, TraversalError> {
    validate_path_with::<IntegrationsConfig>(root, opts)
}

/// Validate every file under `root` against the schema type `T`.
pub fn validate_path_with<T>(
    root: &Path,
    opts: &ValidateOptions,
) -> Result<ValidationReport, TraversalError>
where
    T: DeserializeOwned + Debug,
{
    let files = collect_files(root)?;
    info!(
        root = %root.display(),
        files = files.len(),
        parallel = opts.parallel,
        "Validating config files"
    );
    let outcomes: Vec<ValidationOutcome> = if opts.parallel {
        files.into_par_iter().map(validate_file::<T>).collect()
    } else {
        files.into_iter().map(validate_file::<T>).collect()
    };
    let report = ValidationReport::from_outcomes(root, outcomes);
    if report.passed {
        info!(files = report.summary.files, "All config files are valid");
    } else {
        error!(
            failed = report.summary.failed,
            files = report.summary.files,
            "One or more config files were invalid"
        );
    }
    Ok(report)
}

/// Run both stages on one file and record where it stopped.
pub fn validate_file<T>(path: PathBuf) -> ValidationOutcome
where
    T: DeserializeOwned + Debug,
{
    let span = info_span!("file", path = %path.display());
    let _enter = span.enter();
    match check_file::<T>(&path) {
        Ok(()) => {
            info!("All good");
            ValidationOutcome::passed(path)
        }
        Err(e) => {
            let (stage, message) = split_stage(&e);
            match stage {
                Stage::Read => error!(error = %message, "Failed to read file"),
                Stage::Syntax => error!(error = %message, "Invalid yaml"),
                Stage::Schema => error!(error = %message, "Invalid configuration"),
            }
            ValidationOutcome::failed(path, stage, message)
        }
    }
}

fn check_file<T>(path: &Path) -> Result<(), StageError>
where
    T: DeserializeOwned + Debug,
{
    let bytes = fs::read(path)?;
    info!("Validating yaml...");
    let doc = parse_document(&bytes)?;
    debug!(?doc, "Parsed document");
    info!("Validating configuration...");
    let cfg = parse_schema::<T>(&bytes)?;
    debug!(?cfg, "Parsed configuration");
    Ok(())
}

fn split_stage(e: &StageError) -> (Stage, String) {
    match e {
        StageError::Read(io) => (Stage::Read, io.to_string()),
        StageError::Syntax(y) => (Stage::Syntax, y.to_string()),
        StageError::Schema(y) => (Stage::Schema, y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use serde::Deserialize;
    use tempfile::tempdir;

    fn run(root: &Path) -> ValidationReport {
        validate_path(root, &ValidateOptions::default()).unwrap()
    }

    #[test]
    fn test_minimal_valid_config_passes() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("ok.yml"),
            "integrations:\n  - name: nri-flex\n    interval: 30s\n",
        )
        .unwrap();
        let rep = run(tmp.path());
        assert!(rep.passed);
        assert_eq!(rep.outcomes.len(), 1);
        assert_eq!(rep.outcomes[0].outcome, Outcome::Passed);
    }

    #[test]
    fn test_bad_syntax_stops_at_syntax_stage() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("bad_syntax.yml"), "foo: [unclosed").unwrap();
        let rep = run(tmp.path());
        assert!(!rep.passed);
        assert_eq!(rep.outcomes[0].failed_stage(), Some(Stage::Syntax));
        assert_eq!(rep.summary.schema_errors, 0);
    }

    #[test]
    fn test_unknown_field_fails_schema_stage() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("unknown_field.yml"),
            "integrations: []\ntotally_unrecognized_key: 1\n",
        )
        .unwrap();
        let rep = run(tmp.path());
        assert!(!rep.passed);
        match &rep.outcomes[0].outcome {
            Outcome::Failed { stage, message } => {
                assert_eq!(*stage, Stage::Schema);
                assert!(message.contains("totally_unrecognized_key"));
            }
            Outcome::Passed => panic!("expected schema failure"),
        }
    }

    #[test]
    fn test_null_and_multi_document_files_pass() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("null.yml"), "~\n").unwrap();
        fs::write(
            tmp.path().join("multidoc.yml"),
            "integrations:\n  - name: a\n---\nb: 2\n",
        )
        .unwrap();
        let rep = run(tmp.path());
        assert!(rep.passed, "{:?}", rep.outcomes);
        assert_eq!(rep.summary.passed, 2);
    }

    #[test]
    fn test_first_document_still_checked_against_schema() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("multidoc.yml"), "a: 1\n---\nb: 2\n").unwrap();
        let rep = run(tmp.path());
        assert_eq!(rep.outcomes[0].failed_stage(), Some(Stage::Schema));
    }

    #[test]
    fn test_empty_directory_passes_vacuously() {
        let tmp = tempdir().unwrap();
        let rep = run(tmp.path());
        assert!(rep.passed);
        assert!(rep.outcomes.is_empty());
    }

    #[test]
    fn test_every_file_gets_exactly_one_outcome() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("a.yml"), "integrations: []\n").unwrap();
        fs::write(root.join("nested/b.yml"), "foo: [unclosed").unwrap();
        fs::write(root.join("nested/deeper/c.yml"), "bogus: 1\n").unwrap();
        fs::write(root.join("nested/deeper/d.yml"), "integrations:\n  - name: d\n").unwrap();

        let rep = run(root);
        assert_eq!(rep.outcomes.len(), 4);
        let mut seen: Vec<_> = rep.outcomes.iter().map(|o| o.file.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
        assert_eq!(rep.summary.passed, 2);
        assert_eq!(rep.summary.syntax_errors, 1);
        assert_eq!(rep.summary.schema_errors, 1);
        assert!(!rep.passed);
    }

    #[test]
    fn test_runs_are_idempotent_and_parallel_matches_sequential() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        for i in 0..12 {
            let body = if i % 3 == 0 {
                "foo: [unclosed".to_string()
            } else {
                format!("integrations:\n  - name: n{}\n", i)
            };
            fs::write(root.join(format!("f{:02}.yml", i)), body).unwrap();
        }
        let first = run(root);
        let second = run(root);
        assert_eq!(first, second);
        let par = validate_path(root, &ValidateOptions { parallel: true }).unwrap();
        assert_eq!(first, par);
    }

    #[test]
    fn test_missing_root_is_traversal_error() {
        let tmp = tempdir().unwrap();
        let err = validate_path(&tmp.path().join("missing"), &ValidateOptions::default());
        assert!(matches!(err, Err(TraversalError::RootNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_read_failure() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::os::unix::fs::symlink(root.join("nowhere.yml"), root.join("broken.yml")).unwrap();
        fs::write(root.join("fine.yml"), "integrations: []\n").unwrap();
        let rep = run(root);
        assert_eq!(rep.outcomes.len(), 2);
        assert_eq!(rep.summary.read_errors, 1);
        assert_eq!(rep.outcomes[0].failed_stage(), Some(Stage::Read));
        assert!(rep.outcomes[1].is_passed());
    }

    #[test]
    fn test_schema_type_is_pluggable() {
        #[derive(Debug, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Only {
            #[allow(dead_code)]
            only: u32,
        }
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.yml"), "only: 3\n").unwrap();
        fs::write(tmp.path().join("b.yml"), "only: three\n").unwrap();
        let rep = validate_path_with::<Only>(tmp.path(), &ValidateOptions::default()).unwrap();
        assert!(rep.outcomes[0].is_passed());
        assert_eq!(rep.outcomes[1].failed_stage(), Some(Stage::Schema));
    }
}
