//! Colour rules: raw literals and Sass colour manipulation.

use super::{block_body, is_selector_line, strip_token_refs, LineContext, Rule};
use crate::error::{compile, Result};
use regex::Regex;

/// Hex, `rgb(`, `hsl(` or `hsla(` literal that is not inside a `var(...)`
/// reference. Selector lines are skipped; continuation lines of multi-line
/// values and Sass map entries are checked like any other value.
pub struct HardcodedColor {
    hex: Regex,
    func: Regex,
}

impl HardcodedColor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            hex: compile(r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b")?,
            func: compile(r"\b(?:rgb|hsla?)\(")?,
        })
    }
}

impl Rule for HardcodedColor {
    fn id(&self) -> &'static str {
        "hardcoded-color"
    }

    fn description(&self) -> &'static str {
        "Hardcoded color literal"
    }

    fn hint(&self) -> &'static str {
        "use a semantic color token, e.g. var(--color-text-default)"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        if line.is_token_definition {
            return Vec::new();
        }
        if !line.in_value && is_selector_line(line.code) {
            return Vec::new();
        }
        let value = strip_token_refs(block_body(line.code));
        let mut out: Vec<String> = self
            .hex
            .find_iter(&value)
            .map(|m| format!("Hardcoded color `{}`", m.as_str()))
            .collect();
        // `rgb(var(--ink-rgb))` channels a token, as rgba(var(...), a) does
        out.extend(
            self.func
                .find_iter(&value)
                .filter(|m| !value[m.end()..].trim_start().starts_with("var("))
                .map(|m| format!("Hardcoded color function `{}`", m.as_str())),
        );
        out
    }
}

/// Sass `lighten()` / `darken()`.
pub struct ColorFunction {
    pattern: Regex,
}

impl ColorFunction {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"\b(lighten|darken)\(")?,
        })
    }
}

impl Rule for ColorFunction {
    fn id(&self) -> &'static str {
        "color-function"
    }

    fn description(&self) -> &'static str {
        "Forbidden color manipulation function"
    }

    fn hint(&self) -> &'static str {
        "pick the matching tonal token instead of computing a shade"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        if line.is_token_definition {
            return Vec::new();
        }
        self.pattern
            .captures_iter(line.code)
            .map(|c| format!("`{}()` is not allowed", &c[1]))
            .collect()
    }
}

/// `rgba(` whose first argument is not a token reference.
pub struct RawRgba {
    pattern: Regex,
}

impl RawRgba {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"\brgba\(")?,
        })
    }
}

impl Rule for RawRgba {
    fn id(&self) -> &'static str {
        "raw-rgba"
    }

    fn description(&self) -> &'static str {
        "Raw rgba() value"
    }

    fn hint(&self) -> &'static str {
        "wrap a token: rgba(var(--color-...-rgb), alpha)"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        self.pattern
            .find_iter(line.code)
            .filter(|m| !line.code[m.end()..].trim_start().starts_with("var("))
            .map(|_| "`rgba()` without a token reference".to_string())
            .collect()
    }
}

/// Sass `mix()`. Native `color-mix()` is fine.
pub struct SassMix {
    pattern: Regex,
}

impl SassMix {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"(?:^|[^\w-])mix\(")?,
        })
    }
}

impl Rule for SassMix {
    fn id(&self) -> &'static str {
        "sass-mix"
    }

    fn description(&self) -> &'static str {
        "Sass mix() function"
    }

    fn hint(&self) -> &'static str {
        "use a blended token or native color-mix()"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        self.pattern
            .find_iter(line.code)
            .map(|_| "Sass `mix()` is not allowed".to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, check_continuation, check_token_file};
    use super::*;

    #[test]
    fn test_hardcoded_color_literals() {
        let rule = HardcodedColor::new().unwrap();
        assert_eq!(check(&rule, "color: #ffffff;").len(), 1);
        assert_eq!(check(&rule, "color: #FFF;").len(), 1);
        assert_eq!(check(&rule, "border: 1px solid rgb(0, 0, 0);").len(), 1);
        assert_eq!(check(&rule, "fill: hsl(210, 40%, 50%);").len(), 1);
        assert_eq!(check(&rule, "box-shadow: 0 0 0 #000, 0 1px #111;").len(), 2);
    }

    #[test]
    fn test_hardcoded_color_ignores_token_refs_and_selectors() {
        let rule = HardcodedColor::new().unwrap();
        assert!(check(&rule, "color: var(--color-text-default, #fff);").is_empty());
        assert!(check(&rule, "#main-nav {").is_empty());
        assert!(check(&rule, "content: '#{$name}';").is_empty());
        assert!(check(&rule, "background: rgba(var(--color-ink-rgb), 0.4);").is_empty());
        assert!(check_token_file(&rule, "$ink: #111111;").is_empty());
        assert!(check(&rule, "#abc,").is_empty());
        assert!(check(&rule, "#abc .title { color: red; }").is_empty());
    }

    #[test]
    fn test_hardcoded_color_on_continuation_and_map_lines() {
        let rule = HardcodedColor::new().unwrap();
        assert_eq!(check_continuation(&rule, "#ff0000,").len(), 1);
        assert_eq!(check_continuation(&rule, "0 2px 4px #111;").len(), 1);
        assert_eq!(check(&rule, "primary: #ff0000,").len(), 1);
        assert_eq!(check(&rule, "$accent: #ff0000;").len(), 1);
        assert_eq!(check(&rule, "@include button($bg: #fff);").len(), 1);
    }

    #[test]
    fn test_channel_token_inside_colour_function_is_allowed() {
        let rule = HardcodedColor::new().unwrap();
        assert!(check(&rule, "color: rgb(var(--color-ink-rgb));").is_empty());
        assert!(check(&rule, "color: hsl( var(--color-ink-hsl));").is_empty());
        assert_eq!(check(&rule, "color: rgb(0 0 0 / 50%);").len(), 1);
    }

    #[test]
    fn test_color_function_forbidden_outside_token_files() {
        let rule = ColorFunction::new().unwrap();
        assert_eq!(check(&rule, "color: darken($ink, 10%);"), vec!["`darken()` is not allowed"]);
        assert_eq!(check(&rule, "color: lighten($ink, 5%);").len(), 1);
        assert!(check_token_file(&rule, "$ink-hover: darken($ink, 10%);").is_empty());
    }

    #[test]
    fn test_raw_rgba() {
        let rule = RawRgba::new().unwrap();
        assert_eq!(check(&rule, "background: rgba(0, 0, 0, 0.5);").len(), 1);
        assert!(check(&rule, "background: rgba(var(--color-ink-rgb), 0.5);").is_empty());
        assert!(check(&rule, "background: rgba( var(--color-ink-rgb), 0.5);").is_empty());
    }

    #[test]
    fn test_sass_mix_but_not_color_mix() {
        let rule = SassMix::new().unwrap();
        assert_eq!(check(&rule, "color: mix(red, blue, 50%);").len(), 1);
        assert_eq!(check(&rule, "color: color.mix(red, blue);").len(), 1);
        assert!(check(&rule, "background: color-mix(in srgb, red 50%, blue 50%);").is_empty());
        assert!(check(&rule, "@include mixin(foo);").is_empty());
    }
}
