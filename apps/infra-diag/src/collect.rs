//! Candidate discovery: every regular file below the validated root.

use crate::error::TraversalError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// List every regular file reachable from `root` by recursive descent.
///
/// - Directories are descended into but never returned.
/// - Symlinks are followed. A link pointing back at one of its own
///   ancestors is skipped with a warning instead of being walked again.
/// - A dangling link is returned as a candidate so the read stage reports
///   it against its own path.
/// - A `root` that is itself a file yields exactly that file.
///
/// Entries are sorted by file name, so repeated calls over an unchanged
/// tree return the same sequence.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, TraversalError> {
    if let Err(e) = fs::metadata(root) {
        if e.kind() == ErrorKind::NotFound {
            return Err(TraversalError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(e) => {
                if e.file_type().is_file() {
                    files.push(e.into_path());
                }
            }
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    warn!(
                        path = %display_opt(err.path()),
                        ancestor = %ancestor.display(),
                        "Skipping symlink loop"
                    );
                    continue;
                }
                if is_dangling_link(&err) {
                    if let Some(p) = err.path() {
                        debug!(path = %p.display(), "Dangling symlink kept as candidate");
                        files.push(p.to_path_buf());
                        continue;
                    }
                }
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                return Err(TraversalError::Walk { path, source: err });
            }
        }
    }
    debug!(root = %root.display(), count = files.len(), "Collected candidate files");
    Ok(files)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err
            .io_error()
            .map(|io| io.kind() == ErrorKind::NotFound)
            .unwrap_or(false)
}

fn display_opt(p: Option<&Path>) -> String {
    p.map(|p| p.display().to_string()).unwrap_or_default()
}
