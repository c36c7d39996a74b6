//! Output rendering for lint, fix, and rules commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::checks::RuleSet;
use crate::fix::FixReport;
use crate::models::{FixStatus, LintResult};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    if output == "json" {
        print_json(&compose_lint_json(res));
        return;
    }
    let color = use_colors(output);
    for v in &res.violations {
        let location = format!("{}:{}", v.path, v.line_number);
        if color {
            println!(
                "{} {} {} ❲{}❳ — {}",
                "✖".red(),
                "⟦error⟧".red().bold(),
                location.bold(),
                v.rule_id,
                v.message
            );
            println!("    {} {}", "│".bright_black(), v.snippet.bright_black());
            println!("    {} {}", "↳ fix:".cyan(), v.hint);
        } else {
            println!("✖ ⟦error⟧ {} ❲{}❳ — {}", location, v.rule_id, v.message);
            println!("    │ {}", v.snippet);
            println!("    ↳ fix: {}", v.hint);
        }
    }
    for f in &res.rule_failures {
        let line = format!(
            "{}:{} ❲{}❳ — rule failed: {}",
            f.path, f.line_number, f.rule_id, f.reason
        );
        if color {
            println!("{} {} {}", "▲".yellow(), "⟦warn⟧".yellow().bold(), line);
        } else {
            println!("▲ ⟦warn⟧ {}", line);
        }
    }
    for path in &res.unreadable {
        let line = format!("{} — could not be read; not scanned", path);
        if color {
            println!("{} {} {}", "✖".red(), "⟦error⟧".red().bold(), line);
        } else {
            println!("✖ ⟦error⟧ {}", line);
        }
    }
    let summary = format!(
        "— Summary — violations={} files={} excluded={} unreadable={} rule_failures={}",
        res.summary.violations,
        res.summary.files,
        res.summary.excluded,
        res.summary.unreadable,
        res.summary.rule_failures
    );
    let verdict = if res.summary.violations > 0 {
        format!("✖ Found {} token violation(s)", res.summary.violations)
    } else if res.summary.unreadable > 0 {
        format!("✖ {} file(s) could not be scanned", res.summary.unreadable)
    } else {
        "✔ No token violations found".to_string()
    };
    let failed = res.exit_code() != 0;
    if color {
        println!("{}", summary.bold());
        if failed {
            println!("{}", verdict.red().bold());
        } else {
            println!("{}", verdict.green().bold());
        }
    } else {
        println!("{}", summary);
        println!("{}", verdict);
    }
}

/// Start banner for human fix output.
pub fn print_fix_banner(output: &str, write: bool) {
    if output == "json" {
        return;
    }
    let text = if write {
        "▶ Migrating legacy token usage"
    } else {
        "▶ Checking for migratable token usage (no files written)"
    };
    if use_colors(output) {
        println!("{}", text.cyan().bold());
    } else {
        println!("{}", text);
    }
}

/// Print fix results. When `diff` is set, changed lines are shown for
/// files that were (or would be) rewritten.
pub fn print_fix(report: &FixReport, output: &str, write: bool, diff: bool) {
    if output == "json" {
        print_json(&compose_fix_json(report, write, diff));
        return;
    }
    let color = use_colors(output);
    for r in &report.results {
        match r.status {
            FixStatus::Fixed | FixStatus::WouldFix => {
                let label = if r.status == FixStatus::Fixed {
                    "✏️  fixed:"
                } else {
                    "✏️  would fix:"
                };
                if color {
                    println!("{} {}", label.green().bold(), r.file.bold());
                } else {
                    println!("{} {}", label, r.file);
                }
                if diff {
                    if let Some(d) = build_line_diff(r.original.as_deref(), r.rewritten.as_deref())
                    {
                        println!("{}", d);
                    }
                }
            }
            FixStatus::Failed => {
                let err = r.error.as_deref().unwrap_or("unknown error");
                if color {
                    println!("{} {} ({})", "✖ failed:".red().bold(), r.file.bold(), err);
                } else {
                    println!("✖ failed: {} ({})", r.file, err);
                }
            }
            FixStatus::Unchanged => {}
        }
    }
    let verb = if write { "fixed" } else { "would fix" };
    let mut closing = format!(
        "■ Done: {} {} file(s) of {} scanned",
        verb,
        report.changed(),
        report.results.len()
    );
    if report.failed() > 0 {
        closing.push_str(&format!(", {} failed", report.failed()));
    }
    if color {
        println!("{}", closing.bold());
    } else {
        println!("{}", closing);
    }
}

/// Print every active rule with its description and fix hint.
pub fn print_rules(rules: &RuleSet, output: &str) {
    if output == "json" {
        let items: Vec<_> = rules
            .rules()
            .map(|r| json!({"id": r.id(), "description": r.description(), "hint": r.hint()}))
            .collect();
        print_json(&JsonVal::Array(items));
        return;
    }
    let color = use_colors(output);
    for r in rules.rules() {
        if color {
            println!("{:<22} {} ({})", r.id().bold(), r.description(), r.hint().bright_black());
        } else {
            println!("{:<22} {} ({})", r.id(), r.description(), r.hint());
        }
    }
}

/// Changed lines as `-old` / `+new` pairs with line numbers. Falls back to
/// whole-content blocks when the line count changed.
fn build_line_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let mut out = String::new();
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    if old_lines.len() != new_lines.len() {
        out.push_str("--- old\n");
        out.push_str(old);
        out.push_str("\n+++ new\n");
        out.push_str(new);
        return Some(out);
    }
    for (i, (a, b)) in old_lines.iter().zip(new_lines.iter()).enumerate() {
        if a != b {
            out.push_str(&format!("  {:>4} - {}\n", i + 1, a.trim()));
            out.push_str(&format!("  {:>4} + {}\n", i + 1, b.trim()));
        }
    }
    Some(out.trim_end().to_string())
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Compose fix JSON object (pure) for testing/snapshot purposes.
pub fn compose_fix_json(report: &FixReport, write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.status != FixStatus::Unchanged)
        .map(|r| {
            json!({
                "file": r.file,
                "status": r.status,
                "error": r.error,
                "diff": if diff { build_line_diff(r.original.as_deref(), r.rewritten.as_deref()) } else { None },
            })
        })
        .collect();
    let summary = json!({
        "changed": report.changed(),
        "failed": report.failed(),
        "total": report.results.len(),
        "wrote": if write { report.changed() } else { 0 },
        "missingRoots": report.missing_roots,
    });
    json!({"results": items, "summary": summary})
}
