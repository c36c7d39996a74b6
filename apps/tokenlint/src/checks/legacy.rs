//! Cross-reference against the legacy definition registry.

use super::{LineContext, Rule};
use crate::error::{compile, Result};
use crate::legacy::LegacyDefinitions;
use regex::Regex;

/// Flags classes, mixins, Sass variables and custom properties that were
/// removed from the design system.
pub struct LegacyReintroduced {
    defs: LegacyDefinitions,
    class: Regex,
    mixin: Regex,
    sass_var: Regex,
    css_var_use: Regex,
    css_var_def: Regex,
}

impl LegacyReintroduced {
    pub fn new(defs: LegacyDefinitions) -> Result<Self> {
        Ok(Self {
            defs,
            class: compile(r"(?:^|[\s,>+~(])(\.[A-Za-z_][\w-]*)")?,
            mixin: compile(r"@include\s+([\w.-]+)")?,
            sass_var: compile(r"\$[A-Za-z_][\w-]*")?,
            css_var_use: compile(r"var\(\s*(--[\w-]+)")?,
            css_var_def: compile(r"^(--[\w-]+)\s*:")?,
        })
    }

    fn check_mixin(&self, code: &str) -> Vec<String> {
        let mut out = Vec::new();
        for cap in self.mixin.captures_iter(code) {
            let full = &cap[1];
            let bare = full.rsplit('.').next().unwrap_or(full);
            if self.defs.has_mixin(full) || self.defs.has_mixin(bare) {
                out.push(format!("Legacy mixin `{}` was removed", full));
            }
        }
        out
    }
}

fn is_module_statement(code: &str) -> bool {
    ["@import", "@use", "@forward"]
        .iter()
        .any(|kw| code.starts_with(kw))
}

fn is_selector_definition(code: &str) -> bool {
    code.starts_with('.') && code.ends_with('{')
}

fn is_bem_line(code: &str) -> bool {
    code.starts_with("&__") || code.starts_with("&--")
}

impl Rule for LegacyReintroduced {
    fn id(&self) -> &'static str {
        "legacy-reintroduced"
    }

    fn description(&self) -> &'static str {
        "Removed design-system name reintroduced"
    }

    fn hint(&self) -> &'static str {
        "this name was deleted from the design system; use its current replacement"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        let code = line.code;
        if self.defs.is_empty()
            || is_module_statement(code)
            || is_selector_definition(code)
            || is_bem_line(code)
            || code.contains(":not(")
        {
            return Vec::new();
        }
        if code.starts_with("@include") {
            return self.check_mixin(code);
        }

        let mut out = Vec::new();
        for cap in self.class.captures_iter(code) {
            if self.defs.has_class(&cap[1]) {
                out.push(format!("Legacy class `{}` was removed", &cap[1]));
            }
        }
        for m in self.sass_var.find_iter(code) {
            if self.defs.has_variable(m.as_str()) {
                out.push(format!("Legacy variable `{}` was removed", m.as_str()));
            }
        }
        for cap in self
            .css_var_use
            .captures_iter(code)
            .chain(self.css_var_def.captures_iter(code))
        {
            if self.defs.has_css_var(&cap[1]) {
                out.push(format!("Legacy custom property `{}` was removed", &cap[1]));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::check;
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rule() -> LegacyReintroduced {
        let dir = tempdir().unwrap();
        let p = dir.path().join("legacy.json");
        fs::write(
            &p,
            r#"{
                "classes": [".old-card"],
                "variables": ["$old-ink"],
                "mixins": ["old-focus-ring"],
                "cssVars": ["--old-gutter"]
            }"#,
        )
        .unwrap();
        LegacyReintroduced::new(LegacyDefinitions::load(&[p])).unwrap()
    }

    #[test]
    fn test_flags_each_kind() {
        let r = rule();
        assert_eq!(check(&r, "@extend .old-card;").len(), 1);
        assert_eq!(check(&r, ".page .old-card,").len(), 1);
        assert_eq!(check(&r, "color: $old-ink;").len(), 1);
        assert_eq!(check(&r, "@include old-focus-ring;").len(), 1);
        assert_eq!(check(&r, "@include mixins.old-focus-ring();").len(), 1);
        assert_eq!(check(&r, "gap: var(--old-gutter);").len(), 1);
        assert_eq!(check(&r, "--old-gutter: 4px;").len(), 1);
    }

    #[test]
    fn test_line_exclusions() {
        let r = rule();
        assert!(check(&r, "@use 'legacy' as old-card;").is_empty());
        assert!(check(&r, ".old-card {").is_empty());
        assert!(check(&r, "&__old-card {").is_empty());
        assert!(check(&r, "&:not(.old-card) {").is_empty());
        assert!(check(&r, "@include focus($old-ink);").is_empty());
        assert!(check(&r, "color: $new-ink;").is_empty());
    }

    #[test]
    fn test_empty_registry_reports_nothing() {
        let r = LegacyReintroduced::new(LegacyDefinitions::default()).unwrap();
        assert!(check(&r, "@extend .old-card;").is_empty());
    }
}
