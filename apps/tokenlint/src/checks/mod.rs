//! Token-usage rules evaluated line by line.
//!
//! Each rule is a pure function of one comment-stripped line plus the file
//! context and returns the messages it wants reported. `RuleSet` runs every
//! enabled rule in order and isolates a rule that panics so the rest of the
//! line, file and run still get checked.

mod color;
mod legacy;
mod spacing;
mod tokens;

use crate::error::Result;
use crate::exclusion::CommentTracker;
use crate::legacy::LegacyDefinitions;
use crate::models::{RuleFailure, StyleSource, Violation};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;

pub use color::{ColorFunction, HardcodedColor, RawRgba, SassMix};
pub use legacy::LegacyReintroduced;
pub use spacing::{HardcodedSpacing, RawZIndex};
pub use tokens::{DeprecatedToken, LegacyFragment, PrimitiveAccess, SizeSuffix};

/// One line as seen by the rules.
pub struct LineContext<'a> {
    /// Trimmed code with trailing comments removed.
    pub code: &'a str,
    /// The file defines colour tokens itself.
    pub is_token_definition: bool,
    /// The line continues a declaration value opened on an earlier line
    /// (an unclosed paren, or a value that has not reached its `;`).
    pub in_value: bool,
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Suggested fix printed under each violation.
    fn hint(&self) -> &'static str;
    fn check(&self, line: &LineContext<'_>) -> Vec<String>;
}

/// Violations and isolated rule failures for one file.
#[derive(Default)]
pub struct FileScan {
    pub violations: Vec<Violation>,
    pub failures: Vec<RuleFailure>,
}

pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Build the full rule list in evaluation order, minus `disabled` ids.
    pub fn new(legacy: LegacyDefinitions, disabled: &[String]) -> Result<Self> {
        let all: Vec<Box<dyn Rule>> = vec![
            Box::new(HardcodedColor::new()?),
            Box::new(ColorFunction::new()?),
            Box::new(RawRgba::new()?),
            Box::new(SassMix::new()?),
            Box::new(PrimitiveAccess::new()?),
            Box::new(DeprecatedToken::new()?),
            Box::new(SizeSuffix::new()?),
            Box::new(LegacyFragment::new()?),
            Box::new(HardcodedSpacing::new()?),
            Box::new(RawZIndex::new()?),
            Box::new(LegacyReintroduced::new(legacy)?),
        ];
        let rules = all
            .into_iter()
            .filter(|r| !disabled.iter().any(|d| d == r.id()))
            .collect();
        Ok(Self { rules })
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Scan every line of `source`, reporting under `display_path`.
    pub fn scan(&self, source: &StyleSource, display_path: &str) -> FileScan {
        let is_token_definition = crate::exclusion::is_token_definition(&source.path);
        let mut comments = CommentTracker::default();
        let mut values = ValueTracker::default();
        let mut out = FileScan::default();
        for (idx, raw) in source.lines.iter().enumerate() {
            let Some(code) = comments.code(raw) else {
                continue;
            };
            let ctx = LineContext {
                code: &code,
                is_token_definition,
                in_value: values.in_value(),
            };
            values.advance(&code);
            let line_number = idx + 1;
            for rule in &self.rules {
                match catch_unwind(AssertUnwindSafe(|| rule.check(&ctx))) {
                    Ok(messages) => {
                        out.violations.extend(messages.into_iter().map(|message| Violation {
                            path: display_path.to_string(),
                            line_number,
                            rule_id: rule.id().to_string(),
                            message,
                            snippet: raw.trim().to_string(),
                            hint: rule.hint().to_string(),
                        }));
                    }
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        warn!(
                            path = display_path,
                            line = line_number,
                            rule = rule.id(),
                            %reason,
                            "rule failed, continuing"
                        );
                        out.failures.push(RuleFailure {
                            path: display_path.to_string(),
                            line_number,
                            rule_id: rule.id().to_string(),
                            reason,
                        });
                    }
                }
            }
        }
        out
    }
}

/// Follows declaration values across lines so that continuation lines of
/// multi-line gradients, shadows and Sass maps are known to be values.
#[derive(Default)]
struct ValueTracker {
    depth: usize,
    open_decl: bool,
}

impl ValueTracker {
    fn in_value(&self) -> bool {
        self.depth > 0 || self.open_decl
    }

    fn advance(&mut self, code: &str) {
        for ch in code.chars() {
            match ch {
                '(' => self.depth += 1,
                ')' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }
        let tail = code
            .rfind(|c: char| matches!(c, '{' | '}' | ';'))
            .map_or(code, |at| &code[at + 1..])
            .trim();
        if tail.is_empty() {
            // A line ending at `{`, `}` or `;` closes any value
            self.depth = 0;
            self.open_decl = false;
        } else {
            self.open_decl = self.open_decl || opens_declaration(tail);
        }
    }
}

fn opens_declaration(code: &str) -> bool {
    code.contains(": ") || code.ends_with(':')
}

/// A selector line such as `.a:hover,` or `#main-nav {`.
pub(crate) fn is_selector_line(code: &str) -> bool {
    (code.ends_with('{') || code.ends_with(',')) && !opens_declaration(code)
}

/// Text after the last block-opening `{`; Sass `#{...}` interpolation does
/// not open a block.
pub(crate) fn block_body(code: &str) -> &str {
    let bytes = code.as_bytes();
    let open = (0..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'{' && (i == 0 || bytes[i - 1] != b'#'));
    match open {
        Some(at) => &code[at + 1..],
        None => code,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}

/// Split `code` into `(property, value)` declarations.
///
/// Text up to the last `{` is treated as a selector, so single-line blocks
/// such as `.a { color: red; }` still yield their declarations. Selector
/// lines, at-rules and pseudo-class lines yield nothing.
pub(crate) fn declarations(code: &str) -> Vec<(&str, &str)> {
    let body = block_body(code);
    if body.trim_start().starts_with('@') {
        return Vec::new();
    }
    body.split(';')
        .filter_map(|decl| {
            let decl = decl.trim().trim_end_matches('}').trim();
            if decl.ends_with(',') {
                return None;
            }
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let valid = !prop.is_empty()
                && prop
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '$'));
            valid.then(|| (prop, value.trim()))
        })
        .collect()
}

/// Replace every `var(...)` reference (fallbacks included) with `var()`.
pub(crate) fn strip_token_refs(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find("var(") {
        out.push_str(&rest[..at]);
        let after = &rest[at + 4..];
        let mut depth = 1usize;
        let mut end = after.len();
        for (i, ch) in after.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        out.push_str("var()");
        rest = &after[end..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn check(rule: &dyn Rule, code: &str) -> Vec<String> {
        rule.check(&LineContext {
            code,
            is_token_definition: false,
            in_value: false,
        })
    }

    pub fn check_token_file(rule: &dyn Rule, code: &str) -> Vec<String> {
        rule.check(&LineContext {
            code,
            is_token_definition: true,
            in_value: false,
        })
    }

    /// `code` as a continuation line of a value started earlier.
    pub fn check_continuation(rule: &dyn Rule, code: &str) -> Vec<String> {
        rule.check(&LineContext {
            code,
            is_token_definition: false,
            in_value: true,
        })
    }
}
