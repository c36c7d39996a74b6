//! Layout rules: hardcoded spacing magnitudes and raw z-index values.

use super::{declarations, strip_token_refs, LineContext, Rule};
use crate::error::{compile, Result};
use regex::Regex;

pub struct HardcodedSpacing {
    property: Regex,
    px: Regex,
    rem: Regex,
}

impl HardcodedSpacing {
    pub fn new() -> Result<Self> {
        Ok(Self {
            property: compile(
                r"^(?:(?:min|max)-)?(?:margin|padding|gap|row-gap|column-gap|inset|top|bottom|left|right|width|height)(?:-[a-z-]+)?$",
            )?,
            px: compile(r"(?:^|[^\w.])(-?(?:4|8|12|16|20|24|32|40|48|64)px)\b")?,
            rem: compile(r"(?:^|[^\w.])(-?(?:0?\.25|0?\.5|0?\.75|1|1\.25|1\.5|2|2\.5|3|4)rem)\b")?,
        })
    }
}

impl Rule for HardcodedSpacing {
    fn id(&self) -> &'static str {
        "hardcoded-spacing"
    }

    fn description(&self) -> &'static str {
        "Hardcoded spacing value"
    }

    fn hint(&self) -> &'static str {
        "use a spacing scale token, e.g. var(--scale-4) for 16px"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for (prop, value) in declarations(line.code) {
            if !self.property.is_match(&prop.to_ascii_lowercase()) {
                continue;
            }
            let value = strip_token_refs(value);
            for cap in self.px.captures_iter(&value).chain(self.rem.captures_iter(&value)) {
                values.push(cap[1].to_string());
            }
        }
        if values.is_empty() {
            return Vec::new();
        }
        let listed = values
            .iter()
            .map(|v| format!("`{}`", v))
            .collect::<Vec<_>>()
            .join(", ");
        vec![format!("Hardcoded spacing {}", listed)]
    }
}

pub struct RawZIndex {
    pattern: Regex,
}

impl RawZIndex {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"z-index\s*:\s*(-?\d+)\b")?,
        })
    }
}

impl Rule for RawZIndex {
    fn id(&self) -> &'static str {
        "raw-z-index"
    }

    fn description(&self) -> &'static str {
        "Raw z-index value"
    }

    fn hint(&self) -> &'static str {
        "use a named layer token, e.g. var(--z-index-overlay)"
    }

    fn check(&self, line: &LineContext<'_>) -> Vec<String> {
        self.pattern
            .captures_iter(line.code)
            .map(|c| format!("Raw z-index `{}`", &c[1]))
            .collect()
    }
}
