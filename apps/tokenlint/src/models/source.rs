//! A stylesheet read from disk.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StyleSource {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl StyleSource {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_text(path, &text))
    }

    pub fn from_text(path: &Path, text: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}
