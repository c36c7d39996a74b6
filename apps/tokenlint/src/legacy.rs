//! Registry of design-system names that were removed and must not return.
//!
//! Sources are JSON files shaped like
//! `{"classes": [...], "variables": [...], "mixins": [...], "cssVars": [...]}`.
//! Names keep their sigil (`.btn-old`, `$old-var`, `--old-prop`); mixins are
//! bare. Lookups are plain set membership.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyFile {
    classes: Vec<String>,
    variables: Vec<String>,
    mixins: Vec<String>,
    css_vars: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct LegacyDefinitions {
    classes: HashSet<String>,
    variables: HashSet<String>,
    mixins: HashSet<String>,
    css_vars: HashSet<String>,
}

impl LegacyDefinitions {
    /// Load and union every source. Unreadable or malformed sources are
    /// logged and contribute nothing.
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> Self {
        let mut defs = LegacyDefinitions::default();
        for src in sources {
            let path = src.as_ref();
            let data = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "legacy definitions not loaded");
                    continue;
                }
            };
            match serde_json::from_str::<LegacyFile>(&data) {
                Ok(file) => {
                    debug!(
                        path = %path.display(),
                        classes = file.classes.len(),
                        variables = file.variables.len(),
                        mixins = file.mixins.len(),
                        css_vars = file.css_vars.len(),
                        "loaded legacy definitions"
                    );
                    defs.merge(file);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "legacy definitions are not valid JSON");
                }
            }
        }
        defs
    }

    fn merge(&mut self, file: LegacyFile) {
        self.classes.extend(file.classes);
        self.variables.extend(file.variables);
        self.mixins.extend(file.mixins);
        self.css_vars.extend(file.css_vars);
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn has_mixin(&self, name: &str) -> bool {
        self.mixins.contains(name)
    }

    pub fn has_css_var(&self, name: &str) -> bool {
        self.css_vars.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.variables.is_empty()
            && self.mixins.is_empty()
            && self.css_vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.variables.len() + self.mixins.len() + self.css_vars.len()
    }
}
