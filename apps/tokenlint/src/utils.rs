//! Small shared helpers: colored message prefixes and path display.

use owo_colors::OwoColorize;
use std::path::Path;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "⟦error⟧".red().bold().to_string()
    } else {
        "⟦error⟧".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "⟦note⟧".cyan().bold().to_string()
    } else {
        "⟦note⟧".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "⟦info⟧".blue().bold().to_string()
    } else {
        "⟦info⟧".to_string()
    }
}

/// Display `path` relative to `base` with forward slashes.
///
/// Falls back to the path as given when no relative form exists.
pub fn rel_to(base: &Path, path: &Path) -> String {
    let rel = pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf());
    normalize_slashes(&rel)
}

pub fn normalize_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
