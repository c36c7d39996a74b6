//! Lint runner for token-usage rules.
//!
//! Produces a `LintResult` with every violation and a summary. Files are
//! scanned in parallel; violations are ordered by file, then line, then
//! rule so output is deterministic. The exit decision is a pure function of
//! the result (`LintResult::exit_code`).

use crate::checks::RuleSet;
use crate::config::Effective;
use crate::error::Result;
use crate::exclusion::ExclusionPolicy;
use crate::legacy::LegacyDefinitions;
use crate::models::{LintResult, StyleSource, Summary};
use crate::utils;
use crate::walk;
use rayon::prelude::*;
use tracing::{debug, warn};

enum FileOutcome {
    Scanned(crate::checks::FileScan),
    Excluded,
    Unreadable(String),
}

/// Run lint across all target roots.
///
/// Missing roots and unreadable files are logged and skipped; a root that
/// is not a directory, or an invalid exclusion glob, aborts the run.
pub fn run_lint(eff: &Effective) -> Result<LintResult> {
    let legacy = LegacyDefinitions::load(&eff.legacy);
    debug!(names = legacy.len(), "legacy registry ready");
    let rules = RuleSet::new(legacy, &eff.disabled_rules)?;
    let exclusions = ExclusionPolicy::new(&eff.exclude)?;
    let collected = walk::collect_files(&eff.roots, &eff.extensions)?;

    let per_file: Vec<FileOutcome> = collected
        .files
        .par_iter()
        .map(|path| {
            let rel = utils::rel_to(&eff.repo_root, path);
            if exclusions.is_excluded(&rel) {
                debug!(path = %rel, "excluded from lint");
                return FileOutcome::Excluded;
            }
            match StyleSource::read(path) {
                Ok(source) => FileOutcome::Scanned(rules.scan(&source, &rel)),
                Err(e) => {
                    warn!(path = %rel, error = %e, "skipping unreadable file");
                    FileOutcome::Unreadable(rel)
                }
            }
        })
        .collect();

    let mut result = LintResult {
        missing_roots: collected
            .missing_roots
            .iter()
            .map(|r| utils::rel_to(&eff.repo_root, r))
            .collect(),
        ..LintResult::default()
    };
    let mut files = 0usize;
    let mut excluded = 0usize;
    for outcome in per_file {
        match outcome {
            FileOutcome::Scanned(scan) => {
                files += 1;
                result.violations.extend(scan.violations);
                result.rule_failures.extend(scan.failures);
            }
            FileOutcome::Excluded => excluded += 1,
            FileOutcome::Unreadable(rel) => result.unreadable.push(rel),
        }
    }
    result.violations.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then(a.line_number.cmp(&b.line_number))
            .then(a.rule_id.cmp(&b.rule_id))
    });
    result.unreadable.sort();
    result.summary = Summary {
        violations: result.violations.len(),
        files,
        excluded,
        rule_failures: result.rule_failures.len(),
        missing_roots: result.missing_roots.len(),
        unreadable: result.unreadable.len(),
    };
    Ok(result)
}
