//! File discovery for source directories
//!
//! Finds the `.csv`, `.json` and `.xml` files directly inside the source
//! directory. Subdirectories are not searched and hidden files are skipped.

use crate::error::{EtlError, Result};
use crate::models::SourceFormat;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File discovery component for a source directory
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    source_dir: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Fail with `SourceUnavailable` unless the source is an existing directory
    pub fn ensure_available(&self) -> Result<()> {
        if self.source_dir.is_dir() {
            Ok(())
        } else {
            Err(EtlError::SourceUnavailable {
                path: self.source_dir.clone(),
            })
        }
    }

    /// Discover files of one format, sorted by file name
    pub fn discover(&self, format: SourceFormat) -> Result<Vec<PathBuf>> {
        self.ensure_available()?;

        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(&self.source_dir.to_string_lossy()),
            format.extension()
        );
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let entries = glob::glob_with(&pattern, options).map_err(|e| EtlError::Configuration {
            message: format!("invalid search pattern '{}': {}", pattern, e),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                EtlError::io_failure(path, e.into())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(
            "Found {} {} files in {}",
            files.len(),
            format,
            self.source_dir.display()
        );
        Ok(files)
    }

    /// Discover files for every format, in extraction order
    pub fn discover_all(&self) -> Result<Vec<(SourceFormat, Vec<PathBuf>)>> {
        SourceFormat::ALL
            .into_iter()
            .map(|format| Ok((format, self.discover(format)?)))
            .collect()
    }
}
