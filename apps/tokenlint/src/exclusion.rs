//! Path- and line-level exclusions applied before any rule runs.
//!
//! Path exclusion is all-or-nothing: an excluded file is never scanned.
//! Line handling skips comment lines and strips trailing comments so that
//! commented-out examples are not reported.

use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::borrow::Cow;
use std::path::Path;

/// Path fragments that mark files outside the policy: token and primitive
/// definitions, generated utilities, style-guide/demo pages, backups.
const EXCLUDED_PATH_FRAGMENTS: &[&str] = &[
    "/tokens/",
    "/primitives/",
    "/_tokens.",
    "/_primitives.",
    "/generated/",
    ".generated.",
    "/utilities/_generated",
    "/styleguide/",
    "/style-guide/",
    "/demo/",
    "/demos/",
    "/backup/",
    "/backups/",
    ".bak/",
];

/// File-name prefixes of sources that define colour tokens themselves.
const TOKEN_DEFINITION_PREFIXES: &[&str] = &["_theme", "theme", "_palette", "palette"];

#[derive(Debug, Default, Clone)]
pub struct ExclusionPolicy {
    patterns: Vec<Pattern>,
}

impl ExclusionPolicy {
    /// Build a policy with extra glob patterns matched against the
    /// repository-relative path.
    pub fn new(extra_globs: &[String]) -> Result<Self> {
        let patterns = extra_globs
            .iter()
            .map(|g| {
                Pattern::new(g).map_err(|source| Error::Glob {
                    pattern: g.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// True when no rule may run against `rel_path` (forward slashes,
    /// relative to the repository root).
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        let anchored = format!("/{}", rel_path.trim_start_matches('/'));
        if EXCLUDED_PATH_FRAGMENTS
            .iter()
            .any(|frag| anchored.contains(frag))
        {
            return true;
        }
        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(rel_path, opts))
    }
}

/// True when the file defines tokens (theme/palette sources) and may
/// therefore hold raw colour values.
pub fn is_token_definition(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    TOKEN_DEFINITION_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || name.contains(".tokens.")
}

/// Tracks multi-line block comments across the lines of one file.
#[derive(Debug, Default)]
pub struct CommentTracker {
    in_block: bool,
}

impl CommentTracker {
    /// Returns the code part of `line` to scan, or `None` when nothing but
    /// comments and whitespace is left.
    ///
    /// Closed `/* ... */` spans are removed and scanning continues after
    /// them; an unclosed `/*` cuts the line and carries over to the next.
    pub fn code<'a>(&mut self, line: &'a str) -> Option<Cow<'a, str>> {
        let code = strip_comments(line.trim(), &mut self.in_block);
        let code = match code {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        };
        (!code.is_empty()).then_some(code)
    }
}

/// Remove comments from a single line with no block comment carried in.
pub fn strip_inline_comment(line: &str) -> Cow<'_, str> {
    let mut in_block = false;
    strip_comments(line, &mut in_block)
}

/// Drop comment text from `line`, updating `in_block` for block comments
/// that stay open past the end of the line.
///
/// Markers inside quoted strings are ignored, and a `//` preceded by `:` or
/// `(` (as in `url(https://...)` or `url(//cdn...)`) is not a comment.
fn strip_comments<'a>(line: &'a str, in_block: &mut bool) -> Cow<'a, str> {
    let bytes = line.as_bytes();
    let mut kept: Vec<(usize, usize)> = Vec::new();
    let mut seg_start = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0usize;
    while i < bytes.len() {
        if *in_block {
            match line[i..].find("*/") {
                Some(end) => {
                    *in_block = false;
                    i += end + 2;
                    seg_start = i;
                    continue;
                }
                None => {
                    seg_start = bytes.len();
                    break;
                }
            }
        }
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                kept.push((seg_start, i));
                *in_block = true;
                i += 2;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/')
                && (i == 0 || !matches!(bytes[i - 1], b':' | b'(')) =>
            {
                kept.push((seg_start, i));
                seg_start = bytes.len();
                break;
            }
            _ => {}
        }
        i += 1;
    }
    if seg_start < bytes.len() {
        kept.push((seg_start, bytes.len()));
    }
    match kept.as_slice() {
        [] => Cow::Borrowed(""),
        [(s, e)] => Cow::Borrowed(line[*s..*e].trim_end()),
        parts => {
            let mut out = String::with_capacity(line.len());
            for (s, e) in parts {
                out.push_str(&line[*s..*e]);
            }
            Cow::Owned(out.trim_end().to_string())
        }
    }
}
