//! Recursive file enumeration over the configured target roots.
//!
//! The walker is extension-agnostic; `collect_files` applies the extension
//! filter on top of it. A missing root is a normal outcome, a root that is
//! a file is an error.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The root was walked; `files` regular files were visited.
    Walked { files: usize },
    /// The root does not exist. Nothing was visited.
    Missing,
}

/// Visit every regular file beneath `root`, depth-first, in file-name order.
///
/// Unreadable entries below the root are logged and skipped.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<WalkOutcome>
where
    F: FnMut(&Path),
{
    if !root.exists() {
        return Ok(WalkOutcome::Missing);
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }
    let mut files = 0usize;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files += 1;
            visit(entry.path());
        }
    }
    debug!(root = %root.display(), files, "walked root");
    Ok(WalkOutcome::Walked { files })
}

/// Files collected across all roots, plus the roots that were missing.
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<PathBuf>,
    pub missing_roots: Vec<PathBuf>,
}

/// Walk `roots` in order and keep files whose extension is in `extensions`.
///
/// Extensions are compared case-insensitively and without the leading dot.
pub fn collect_files(roots: &[PathBuf], extensions: &[String]) -> Result<Collected> {
    let mut out = Collected::default();
    for root in roots {
        let outcome = walk(root, |path| {
            if has_extension(path, extensions) {
                out.files.push(path.to_path_buf());
            }
        })?;
        if outcome == WalkOutcome::Missing {
            warn!(root = %root.display(), "target root not found, skipping");
            out.missing_roots.push(root.clone());
        }
    }
    Ok(out)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_walk_visits_nested_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.scss"), "").unwrap();
        fs::write(root.join("a/b/c/deep.scss"), "").unwrap();
        let mut seen = Vec::new();
        let outcome = walk(root, |p| seen.push(p.to_path_buf())).unwrap();
        assert_eq!(outcome, WalkOutcome::Walked { files: 2 });
        assert!(seen.iter().any(|p| p.ends_with("a/b/c/deep.scss")));
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let dir = tempdir().unwrap();
        let outcome = walk(&dir.path().join("nope"), |_| {}).unwrap();
        assert_eq!(outcome, WalkOutcome::Missing);
    }

    #[test]
    fn test_file_root_is_an_error() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("file.scss");
        fs::write(&f, "").unwrap();
        assert!(matches!(walk(&f, |_| {}), Err(Error::NotADirectory(_))));
    }

    #[test]
    fn test_collect_filters_extension_and_continues_past_missing_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("ui")).unwrap();
        fs::write(root.join("ui/a.scss"), "").unwrap();
        fs::write(root.join("ui/b.SCSS"), "").unwrap();
        fs::write(root.join("ui/c.ts"), "").unwrap();
        let roots = vec![root.join("missing"), root.join("ui")];
        let got = collect_files(&roots, &["scss".to_string()]).unwrap();
        assert_eq!(got.files.len(), 2);
        assert_eq!(got.missing_roots, vec![root.join("missing")]);
    }
}
