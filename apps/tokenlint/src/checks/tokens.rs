//! Token naming rules: primitive access, deprecated names, size suffixes and
//! bare legacy colour stems.

use super::{LineContext, Rule};
use crate::error::{compile, Result};
use regex::Regex;

/// Old token name fragments. `--` fragments only count inside `var(...)`;
/// the others count wherever they appear.
const DEPRECATED_FRAGMENTS: &[&str] = &[
    "--text-color-",
    "--text-muted",
    "--bg-surface",
    "--border-color",
    "--color-brand",
    "--spacing-",
    "--font-size-body",
    "--shadow-elevated",
    "--radius-small",
    "--radius-medium",
    "--radius-large",
    "$brand-",
    "$gray-",
    "$text-color",
    "$base-spacing",
];

/// Primitive-layer token referenced directly instead of through a semantic
/// token.
pub struct PrimitiveAccess {
    css_var: Regex,
    sass_var: Regex,
}

impl PrimitiveAccess {
    pub fn new() -> Result<Self> {
        Ok(Self {
            css_var: compile(r"var\(\s*(--(?:primitive|palette|core)-[\w-]+)")?,
            sass_var: compile(r"(\$(?:primitive|palette|core)-[\w-]+)")?,
        })
    }
}

impl Rule for PrimitiveAccess {
    fn id(&self) -> &'static str {
        "primitive-access"
    }

    fn description(&self) -> &'static str {
        "Direct primitive token access"
    }

    fn hint(&self) -> &'static str {
        "reference the semantic token that aliases this primitive"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        self.css_var
            .captures_iter(line.code)
            .chain(self.sass_var.captures_iter(line.code))
            .map(|c| format!("Primitive token `{}` used directly", &c[1]))
            .collect()
    }
}

pub struct DeprecatedToken {
    var_ref: Regex,
}

impl DeprecatedToken {
    pub fn new() -> Result<Self> {
        Ok(Self {
            var_ref: compile(r"var\(\s*(--[\w-]+)")?,
        })
    }
}

impl Rule for DeprecatedToken {
    fn id(&self) -> &'static str {
        "deprecated-token"
    }

    fn description(&self) -> &'static str {
        "Deprecated token name"
    }

    fn hint(&self) -> &'static str {
        "run `tokenlint fix` or switch to the current token name"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        let mut out = Vec::new();
        for cap in self.var_ref.captures_iter(line.code) {
            let name = &cap[1];
            if let Some(frag) = DEPRECATED_FRAGMENTS
                .iter()
                .filter(|f| f.starts_with("--"))
                .find(|f| name.contains(**f))
            {
                out.push(format!("Deprecated token `{}` (matches `{}`)", name, frag));
            }
        }
        for frag in DEPRECATED_FRAGMENTS.iter().filter(|f| !f.starts_with("--")) {
            if line.code.contains(frag) {
                out.push(format!("Deprecated token fragment `{}`", frag));
            }
        }
        out
    }
}

/// Token or class names ending in a non-standard size suffix.
pub struct SizeSuffix {
    pattern: Regex,
}

impl SizeSuffix {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(
                r"((?:--|\$|\.)[A-Za-z][\w-]*-(sm|md|lg|small|medium|large|huge))(?:[^\w-]|$)",
            )?,
        })
    }
}

fn canonical_size(suffix: &str) -> &'static str {
    match suffix {
        "sm" | "small" => "s",
        "md" | "medium" => "m",
        "lg" | "large" => "l",
        _ => "xl or 2xl",
    }
}

impl Rule for SizeSuffix {
    fn id(&self) -> &'static str {
        "size-suffix"
    }

    fn description(&self) -> &'static str {
        "Non-standard size suffix"
    }

    fn hint(&self) -> &'static str {
        "use the s|m|l|xl|2xl size scale"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        self.pattern
            .captures_iter(line.code)
            .filter(|c| !c[1].ends_with("font-weight-medium"))
            .map(|c| {
                format!(
                    "`{}` uses size suffix `-{}`; expected `-{}`",
                    &c[1],
                    &c[2],
                    canonical_size(&c[2])
                )
            })
            .collect()
    }
}

/// Bare old colour stems such as `primary-500` outside a token reference.
pub struct LegacyFragment {
    stem: Regex,
    bem_modifier: Regex,
}

impl LegacyFragment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stem: compile(
                r"\b(?:primary|secondary|neutral|gray|grey|success|warning|danger|error|info)-\d{2,3}\b",
            )?,
            bem_modifier: compile(r"&(?:--|__)|\.[\w-]+--[\w-]+")?,
        })
    }
}

impl Rule for LegacyFragment {
    fn id(&self) -> &'static str {
        "legacy-fragment"
    }

    fn description(&self) -> &'static str {
        "Bare legacy token fragment"
    }

    fn hint(&self) -> &'static str {
        "replace the palette step with a semantic color token"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        let code = line.code;
        if code.contains("var(") || self.bem_modifier.is_match(code) {
            return Vec::new();
        }
        self.stem
            .find_iter(code)
            .filter(|m| {
                !code[..m.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| matches!(c, '-' | '$' | '.' | '@' | '#'))
            })
            .map(|m| format!("Legacy color fragment `{}`", m.as_str()))
            .collect()
    }
}
