//! Integration tests for the processor module
//!
//! Runs the complete pipeline against temporary source and target
//! directories.


use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create empty `source` and `target` directories under `temp_dir`
pub fn create_workspace(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let source = temp_dir.path().join("source");
    let target = temp_dir.path().join("target");
    fs::create_dir_all(&source).unwrap();
    (source, target)
}

/// Read the progress log and return the message part of each line
pub fn logged_messages(log_path: &Path) -> Vec<String> {
    fs::read_to_string(log_path)
        .unwrap()
        .lines()
        .map(|line| line.split_once(", ").unwrap().1.to_string())
        .collect()
}
