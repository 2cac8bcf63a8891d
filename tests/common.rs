//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating scratch changelog files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Link produced for an issue number with the default issues URL.
pub fn issue_link(number: &str) -> String {
    format!(
        "[\\#{}](https://github.com/0xPellNetwork/pelldvs/issues/{})",
        number, number
    )
}

/// Writes file into directory, creating parent directories as needed.
///
/// # Returns
///
/// Full path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Creates temporary directory holding a single changelog file.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn changelog_fixture(content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = write_file(dir.path(), "CHANGELOG_PENDING.md", content)?;
    Ok((dir, path))
}
