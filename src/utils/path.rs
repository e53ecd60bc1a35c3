//! Path utilities: expand ~, derive the default project name, prepare DB dirs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Basename of `dir`, used as project name when none is configured.
pub fn dir_basename(dir: &Path) -> Option<String> {
    dir.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
}

/// Create the parent directory of a database file if it does not exist.
pub fn ensure_parent_dir(db_path: &Path) -> io::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
