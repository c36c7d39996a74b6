//! Shared data models for lint and fix results.

pub mod source;

pub use source::StyleSource;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A single policy breach found on one line.
pub struct Violation {
    pub path: String,
    pub line_number: usize,
    pub rule_id: String,
    pub message: String,
    pub snippet: String,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// A rule that failed while evaluating one line; the run continued.
pub struct RuleFailure {
    pub path: String,
    pub line_number: usize,
    pub rule_id: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub violations: usize,
    pub files: usize,
    pub excluded: usize,
    pub rule_failures: usize,
    pub missing_roots: usize,
    /// Target files that could not be read and were not scanned.
    pub unreadable: usize,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Lint results container.
pub struct LintResult {
    pub violations: Vec<Violation>,
    pub rule_failures: Vec<RuleFailure>,
    pub missing_roots: Vec<String>,
    pub unreadable: Vec<String>,
    pub summary: Summary,
}

impl LintResult {
    /// Process exit status for CI: any violation fails the run, and so does
    /// a target file that could not be scanned.
    pub fn exit_code(&self) -> i32 {
        if self.summary.violations > 0 || self.summary.unreadable > 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixStatus {
    /// Content changed and was written.
    Fixed,
    /// Content would change; nothing written (check/diff mode).
    WouldFix,
    Unchanged,
    /// Reading or writing the file failed.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
/// Outcome of the codemod for one file.
pub struct FixResult {
    pub file: String,
    pub status: FixStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub original: Option<String>,
    #[serde(skip)]
    pub rewritten: Option<String>,
}

impl FixResult {
    pub fn changed(&self) -> bool {
        matches!(self.status, FixStatus::Fixed | FixStatus::WouldFix)
    }
}
