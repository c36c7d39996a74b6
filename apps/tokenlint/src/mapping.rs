//! Ordered rewrite table used by the codemod.
//!
//! Order matters: specific aliases run before the generic suffix and
//! `--spacing-N` catch-alls, and negative spacing runs before the positive
//! magnitude rules. Every replacement produces text that no rule in the
//! table matches again, which keeps repeated runs a no-op.

use crate::error::{compile, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Where a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingScope {
    /// Anywhere in the file.
    Anywhere,
    /// Only inside the value of spacing declarations (`margin`, `padding`,
    /// `gap`, offsets, sizes), so that e.g. `font-size: 16px` is untouched.
    SpacingValue,
}

#[derive(Debug, Clone)]
pub struct MappingRule {
    pub pattern: Regex,
    /// Replacement in `regex` syntax (`${1}` etc.).
    pub replace: String,
    pub scope: MappingScope,
}

/// Trailing boundary that ends a token name without consuming into it.
const END: &str = r"([^\w-]|$)";

/// Old semantic token → new semantic token.
const ALIASES: &[(&str, &str)] = &[
    ("--text-color-primary", "--color-text-default"),
    ("--text-color-secondary", "--color-text-subtle"),
    ("--text-muted", "--color-text-subtle"),
    ("--bg-surface", "--color-bg-surface"),
    ("--border-color", "--color-border-default"),
    ("--color-brand", "--color-action-primary"),
    ("--spacing-tight", "--space-inline-s"),
    ("--spacing-normal", "--space-inline-m"),
    ("--spacing-loose", "--space-inline-l"),
    ("--font-size-body", "--font-size-m"),
    ("--shadow-elevated", "--shadow-raised"),
    ("--radius-small", "--radius-s"),
    ("--radius-medium", "--radius-m"),
    ("--radius-large", "--radius-l"),
    ("--font-size-huge", "--font-size-2xl"),
];

/// Negative spacing literals that need a `calc()` wrapper.
const NEGATIVE_SPACING: &[(&str, u32)] = &[
    (r"4px", 1),
    (r"8px", 2),
    (r"12px", 3),
    (r"16px", 4),
    (r"24px", 6),
    (r"32px", 8),
    (r"0?\.5rem", 2),
    (r"1rem", 4),
];

/// Spacing literal → scale step.
const MAGNITUDES: &[(&str, u32)] = &[
    (r"4px", 1),
    (r"8px", 2),
    (r"12px", 3),
    (r"16px", 4),
    (r"20px", 5),
    (r"24px", 6),
    (r"32px", 8),
    (r"40px", 10),
    (r"48px", 12),
    (r"64px", 16),
    (r"0?\.25rem", 1),
    (r"0?\.5rem", 2),
    (r"0?\.75rem", 3),
    (r"1rem", 4),
    (r"1\.25rem", 5),
    (r"1\.5rem", 6),
    (r"2rem", 8),
    (r"2\.5rem", 10),
    (r"3rem", 12),
    (r"4rem", 16),
];

/// Size suffix → canonical suffix.
const SUFFIXES: &[(&str, &str)] = &[("lg", "l"), ("md", "m"), ("sm", "s")];

/// Token positions a suffix may be rewritten in, as (prefix, trailer):
/// a `var(--…)` reference, a `--…:` custom property definition, and a Sass
/// `$…` variable. BEM modifiers such as `.btn--size-lg` or `&--size-md` are
/// selectors and never match.
const SUFFIX_POSITIONS: &[(&str, &str)] = &[
    (r"(var\(\s*--[A-Za-z][\w-]*)", END),
    (r"(?m)((?:^|[\s;{])--[A-Za-z][\w-]*)", r"(\s*:)"),
    (r"(\$[A-Za-z][\w-]*)", END),
];

/// Raw z-index magnitude bands → named layer token. A heuristic: values
/// that do not follow this stacking scheme will be misnamed.
const Z_INDEX_BANDS: &[(&str, &str)] = &[
    (r"0", "base"),
    (r"[1-9]", "raised"),
    (r"[1-9]\d", "dropdown"),
    (r"[1-4]\d\d", "sticky"),
    (r"[5-9]\d\d", "overlay"),
    (r"[1-9]\d{3}", "modal"),
    (r"[1-9]\d{4,}", "toast"),
];

fn rule(pattern: &str, replace: impl Into<String>, scope: MappingScope) -> Result<MappingRule> {
    Ok(MappingRule {
        pattern: compile(pattern)?,
        replace: replace.into(),
        scope,
    })
}

/// Build the table in application order.
pub fn default_table() -> Result<Vec<MappingRule>> {
    let mut table = Vec::new();

    for (old, new) in ALIASES {
        table.push(rule(
            &format!("{}{}", regex::escape(old), END),
            format!("{}${{1}}", new),
            MappingScope::Anywhere,
        )?);
    }

    for (literal, step) in NEGATIVE_SPACING {
        table.push(rule(
            &format!(r"(^|[^\w.-])-{}\b", literal),
            format!("${{1}}calc(var(--scale-{}) * -1)", step),
            MappingScope::SpacingValue,
        )?);
    }

    for (literal, step) in MAGNITUDES {
        table.push(rule(
            &format!(r"(^|[^\w.-]){}\b", literal),
            format!("${{1}}var(--scale-{})", step),
            MappingScope::SpacingValue,
        )?);
    }

    for (old, new) in SUFFIXES {
        for (prefix, trailer) in SUFFIX_POSITIONS {
            table.push(rule(
                &format!("{}-{}{}", prefix, old, trailer),
                format!("${{1}}-{}${{2}}", new),
                MappingScope::Anywhere,
            )?);
        }
    }

    for (band, name) in Z_INDEX_BANDS {
        table.push(rule(
            &format!(r"(z-index\s*:\s*){}([^\w.]|$)", band),
            format!("${{1}}var(--z-index-{})${{2}}", name),
            MappingScope::Anywhere,
        )?);
    }

    table.push(rule(
        &format!(r"--spacing-(\d+){}", END),
        "--scale-${1}${2}",
        MappingScope::Anywhere,
    )?);

    Ok(table)
}

/// Locates spacing declarations; group 2 is the value.
pub struct SpacingDeclarations {
    pattern: Regex,
}

impl SpacingDeclarations {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(
                r"(?m)((?:^|[;{])[ \t]*(?:(?:min|max)-)?(?:margin|padding|gap|row-gap|column-gap|inset|top|bottom|left|right|width|height)(?:-[a-z-]+)?[ \t]*:)([^;{}\n]*)",
            )?,
        })
    }
}

/// Apply `table` in order over the whole content.
pub fn apply<'a>(
    content: &'a str,
    table: &[MappingRule],
    decls: &SpacingDeclarations,
) -> Cow<'a, str> {
    let mut out: Cow<'a, str> = Cow::Borrowed(content);
    for rule in table {
        let next = match rule.scope {
            MappingScope::Anywhere => rule.pattern.replace_all(&out, rule.replace.as_str()),
            MappingScope::SpacingValue => decls.pattern.replace_all(&out, |c: &Captures| {
                format!(
                    "{}{}",
                    &c[1],
                    rule.pattern.replace_all(&c[2], rule.replace.as_str())
                )
            }),
        };
        if let Cow::Owned(s) = next {
            if s != *out {
                out = Cow::Owned(s);
            }
        }
    }
    out
}
