//! Configuration discovery and effective settings resolution.
//!
//! Tokenlint reads `tokenlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `roots`: the UI, features, experiences and web app source trees
//! - `extensions`: `scss`
//! - `legacy`: `design-system/legacy/{foundation,components}.json`
//! - `exclude`: none (built-in path exclusions always apply)
//! - `output`: `human`
//! - `fix.check|diff`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROOTS: &[&str] = &[
    "packages/ui/src",
    "packages/features",
    "packages/experiences",
    "apps/web/src",
];

pub const DEFAULT_LEGACY: &[&str] = &[
    "design-system/legacy/foundation.json",
    "design-system/legacy/components.json",
];

const CONFIG_NAMES: &[&str] = &["tokenlint.toml", "tokenlint.yaml", "tokenlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Lint-related section under `[lint]`.
pub struct LintCfg {
    #[serde(default)]
    pub disable: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Codemod-related section under `[fix]`.
pub struct FixCfg {
    pub check: Option<bool>,
    pub diff: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `tokenlint.toml|yaml`.
pub struct TokenlintConfig {
    pub roots: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub legacy: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub output: Option<String>,
    pub lint: Option<LintCfg>,
    pub fix: Option<FixCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub legacy: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub output: String,
    pub disabled_rules: Vec<String>,
    pub check: bool,
    pub diff: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `tokenlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Locate the config file under `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.is_file())
}

/// Load `TokenlintConfig` from `root`.
///
/// A missing file yields `None`; a file that cannot be read or parsed is an
/// error.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, TokenlintConfig)>> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    let cfg = if is_toml {
        toml::from_str::<TokenlintConfig>(&s).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str::<TokenlintConfig>(&s).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?
    };
    Ok(Some((path, cfg)))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// Relative roots and legacy sources resolve against the repository root.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_roots: &[String],
    cli_output: Option<&str>,
    cli_check: Option<bool>,
    cli_diff: Option<bool>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, TokenlintConfig::default()),
    };

    let roots: Vec<String> = if cli_roots.is_empty() {
        cfg.roots
            .unwrap_or_else(|| DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect())
    } else {
        cli_roots.to_vec()
    };
    let legacy = cfg
        .legacy
        .unwrap_or_else(|| DEFAULT_LEGACY.iter().map(|s| s.to_string()).collect());
    let extensions = cfg
        .extensions
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| vec!["scss".to_string()]);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let check = cli_check
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.check))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);

    Ok(Effective {
        roots: roots.iter().map(|r| repo_root.join(r)).collect(),
        legacy: legacy.iter().map(|l| repo_root.join(l)).collect(),
        repo_root,
        config_path,
        extensions,
        exclude: cfg.exclude.unwrap_or_default(),
        output,
        disabled_rules: cfg.lint.map(|l| l.disable).unwrap_or_default(),
        check,
        diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        let eff = resolve_effective(root.to_str(), &[], None, None, None).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.roots.len(), DEFAULT_ROOTS.len());
        assert_eq!(eff.roots[0], root.join("packages/ui/src"));
        assert_eq!(eff.extensions, vec!["scss"]);
        assert_eq!(eff.output, "human");
        assert!(!eff.check);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("tokenlint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
roots = ["web/styles"]
extensions = ["scss", "css"]
legacy = ["legacy.json"]
exclude = ["**/vendor/**"]
output = "json"
[lint]
disable = ["size-suffix"]
[fix]
check = true
    "#
        )
        .unwrap();

        // Resolve from a nested directory; the root is found by walking up
        fs::create_dir_all(root.join("web/styles")).unwrap();
        let nested = root.join("web/styles");
        let eff = resolve_effective(nested.to_str(), &[], None, None, None).unwrap();
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.roots, vec![root.join("web/styles")]);
        assert_eq!(eff.extensions, vec!["scss", "css"]);
        assert_eq!(eff.legacy, vec![root.join("legacy.json")]);
        assert_eq!(eff.exclude, vec!["**/vendor/**"]);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.disabled_rules, vec!["size-suffix"]);
        assert!(eff.check);
    }

    #[test]
    fn test_load_yaml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("tokenlint.yaml"),
            "roots:\n  - styles\noutput: json\nfix:\n  check: true\n",
        )
        .unwrap();
        let eff = resolve_effective(
            root.to_str(),
            &["other".to_string()],
            Some("human"),
            Some(false),
            None,
        )
        .unwrap();
        assert_eq!(eff.roots, vec![root.join("other")]);
        assert_eq!(eff.output, "human");
        assert!(!eff.check);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tokenlint.toml"), "roots = 3").unwrap();
        let err = resolve_effective(root.to_str(), &[], None, None, None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
