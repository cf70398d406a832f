//! Test utilities for lexdraft
//!
//! Shared fixtures and filesystem helpers used by the workspace's integration tests.
//! Fixtures are plain JSON so the crate does not depend on the engine it tests.

pub mod fixtures;

use std::path::Path;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// Cleaned up automatically when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the directory cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `content` to `name` inside `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}
