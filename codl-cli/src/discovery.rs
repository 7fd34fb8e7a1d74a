//! Finding CODL sources in a directory

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files directly inside `dir` with the given extension, sorted by path
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.display().to_string());
    let pattern = Path::new(&escaped)
        .join(format!("*.{}", extension))
        .display()
        .to_string();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("bad search pattern {}", pattern))? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
