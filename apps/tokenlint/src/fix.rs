//! Codemod runner: applies the mapping table to every target stylesheet.
//!
//! Files are processed in parallel and results are sorted by path. A file
//! is written only when its content changes, through a temporary file in
//! the same directory that is renamed over the original. Read or write
//! failures are recorded per file and never stop the batch.

use crate::config::Effective;
use crate::error::{Error, Result};
use crate::exclusion::ExclusionPolicy;
use crate::mapping::{self, MappingRule, SpacingDeclarations};
use crate::models::{FixResult, FixStatus};
use crate::utils;
use crate::walk;
use rayon::prelude::*;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything the fix command produced.
#[derive(Debug, Default)]
pub struct FixReport {
    pub results: Vec<FixResult>,
    pub missing_roots: Vec<String>,
}

impl FixReport {
    pub fn changed(&self) -> usize {
        self.results.iter().filter(|r| r.changed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == FixStatus::Failed)
            .count()
    }

    /// `1` on filesystem failures, or in check mode when anything would
    /// change; `0` otherwise.
    pub fn exit_code(&self, check: bool) -> i32 {
        if self.failed() > 0 || (check && self.changed() > 0) {
            1
        } else {
            0
        }
    }
}

/// Rewrite target files per the mapping table.
///
/// When `write` is false nothing touches the disk; changed files are
/// reported as `WouldFix` and keep their before/after text for diffs.
pub fn run_fix(eff: &Effective, write: bool) -> Result<FixReport> {
    let table = mapping::default_table()?;
    let decls = SpacingDeclarations::new()?;
    let exclusions = ExclusionPolicy::new(&eff.exclude)?;
    let collected = walk::collect_files(&eff.roots, &eff.extensions)?;

    let mut results: Vec<FixResult> = collected
        .files
        .par_iter()
        .filter_map(|path| {
            let rel = utils::rel_to(&eff.repo_root, path);
            if exclusions.is_excluded(&rel) {
                debug!(path = %rel, "excluded from fix");
                return None;
            }
            Some(fix_file(path, rel, &table, &decls, write))
        })
        .collect();
    results.sort_by(|a, b| a.file.cmp(&b.file));

    Ok(FixReport {
        results,
        missing_roots: collected
            .missing_roots
            .iter()
            .map(|r| utils::rel_to(&eff.repo_root, r))
            .collect(),
    })
}

fn fix_file(
    path: &Path,
    rel: String,
    table: &[MappingRule],
    decls: &SpacingDeclarations,
    write: bool,
) -> FixResult {
    let original = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return failed(rel, Error::io(path, e)),
    };
    let rewritten = match mapping::apply(&original, table, decls) {
        Cow::Owned(s) if s != original => s,
        _ => {
            return FixResult {
                file: rel,
                status: FixStatus::Unchanged,
                error: None,
                original: None,
                rewritten: None,
            }
        }
    };
    if !write {
        return FixResult {
            file: rel,
            status: FixStatus::WouldFix,
            error: None,
            original: Some(original),
            rewritten: Some(rewritten),
        };
    }
    match write_atomic(path, &rewritten) {
        Ok(()) => {
            info!(path = %rel, "fixed");
            FixResult {
                file: rel,
                status: FixStatus::Fixed,
                error: None,
                original: Some(original),
                rewritten: Some(rewritten),
            }
        }
        Err(e) => failed(rel, e),
    }
}

fn failed(rel: String, err: Error) -> FixResult {
    warn!(path = %rel, error = %err, "fix failed for file");
    FixResult {
        file: rel,
        status: FixStatus::Failed,
        error: Some(err.to_string()),
        original: None,
        rewritten: None,
    }
}

/// Replace `path` with `content` in one rename, keeping its permissions.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions()).map_err(|e| Error::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_effective;
    use tempfile::tempdir;

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, Effective) {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tokenlint.toml"), "roots = [\"src\"]\n").unwrap();
        for (rel, body) in files {
            let p = root.join(rel);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, body).unwrap();
        }
        let eff = resolve_effective(root.to_str(), &[], None, None, None).unwrap();
        (dir, eff)
    }

    #[test]
    fn test_fix_writes_changed_files_only() {
        let (dir, eff) = setup(&[
            ("src/a.scss", ".a {\n  margin: 16px;\n}\n"),
            ("src/b.scss", ".b {\n  margin: var(--scale-4);\n}\n"),
        ]);
        let report = run_fix(&eff, true).unwrap();
        assert_eq!(report.changed(), 1);
        assert_eq!(report.results[0].file, "src/a.scss");
        assert_eq!(report.results[0].status, FixStatus::Fixed);
        assert_eq!(report.results[1].status, FixStatus::Unchanged);
        let a = fs::read_to_string(dir.path().join("src/a.scss")).unwrap();
        assert_eq!(a, ".a {\n  margin: var(--scale-4);\n}\n");
    }

    #[test]
    fn test_fix_twice_is_idempotent() {
        let (_dir, eff) = setup(&[("src/a.scss", "z-index: 999;\ngap: 8px;\n")]);
        assert_eq!(run_fix(&eff, true).unwrap().changed(), 1);
        let second = run_fix(&eff, true).unwrap();
        assert_eq!(second.changed(), 0);
        assert_eq!(second.exit_code(false), 0);
    }

    #[test]
    fn test_check_mode_does_not_write() {
        let (dir, eff) = setup(&[("src/a.scss", "margin: 16px;\n")]);
        let report = run_fix(&eff, false).unwrap();
        assert_eq!(report.results[0].status, FixStatus::WouldFix);
        assert_eq!(report.exit_code(true), 1);
        let a = fs::read_to_string(dir.path().join("src/a.scss")).unwrap();
        assert_eq!(a, "margin: 16px;\n");
    }

    #[test]
    fn test_excluded_and_foreign_files_are_left_alone() {
        let (dir, eff) = setup(&[
            ("src/tokens/_spacing.scss", "--spacing-4: 16px;\n"),
            ("src/a.ts", "const margin = 'margin: 16px;'\n"),
        ]);
        let report = run_fix(&eff, true).unwrap();
        assert!(report.results.is_empty());
        let t = fs::read_to_string(dir.path().join("src/tokens/_spacing.scss")).unwrap();
        assert_eq!(t, "--spacing-4: 16px;\n");
    }

    #[test]
    fn test_unreadable_file_is_reported_and_batch_continues() {
        let (dir, eff) = setup(&[("src/b.scss", "margin: 8px;\n")]);
        // Invalid UTF-8 cannot be read as a stylesheet
        fs::write(dir.path().join("src/a.scss"), [0xff, 0xfe, 0xfd]).unwrap();
        let report = run_fix(&eff, true).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.results[0].status, FixStatus::Failed);
        assert!(report.results[0].error.is_some());
        assert_eq!(report.results[1].status, FixStatus::Fixed);
        assert_eq!(report.exit_code(false), 1);
    }

    #[test]
    fn test_missing_roots_are_reported() {
        let (dir, _) = setup(&[]);
        let eff = resolve_effective(
            dir.path().to_str(),
            &["nope".to_string()],
            None,
            None,
            None,
        )
        .unwrap();
        let report = run_fix(&eff, true).unwrap();
        assert_eq!(report.missing_roots, vec!["nope"]);
    }
}
