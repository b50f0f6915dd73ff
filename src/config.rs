//! Configuration for ETL runs.
//!
//! A single `EtlConfig` is built once by the caller and threaded through the
//! pipeline; nothing reads paths from global state.

use crate::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name of the loaded output inside the target directory
pub const DEFAULT_OUTPUT_FILE: &str = "transformed_data.csv";

/// Default file name of the progress log inside the target directory
pub const DEFAULT_LOG_FILE: &str = "log_file.txt";

/// Global configuration for an ETL run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Directory scanned for `.csv`, `.json` and `.xml` inputs
    pub source_dir: PathBuf,

    /// Directory receiving the output file and the progress log
    pub target_dir: PathBuf,

    /// Output file name, relative to `target_dir`
    pub output_file_name: String,

    /// Progress log file name, relative to `target_dir`
    pub log_file_name: String,

    /// Print the transformed dataset to stdout after the transform phase
    pub print_transformed: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("source"),
            target_dir: PathBuf::from("target"),
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            log_file_name: DEFAULT_LOG_FILE.to_string(),
            print_transformed: true,
        }
    }
}

impl EtlConfig {
    /// Create configuration for the given source and target directories
    pub fn new(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            ..Default::default()
        }
    }

    /// Set the output file name
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Set the progress log file name
    pub fn with_log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = name.into();
        self
    }

    /// Suppress printing of the transformed dataset
    pub fn without_printing(mut self) -> Self {
        self.print_transformed = false;
        self
    }

    /// Full path of the output file
    pub fn output_path(&self) -> PathBuf {
        self.target_dir.join(&self.output_file_name)
    }

    /// Full path of the progress log
    pub fn log_path(&self) -> PathBuf {
        self.target_dir.join(&self.log_file_name)
    }

    /// Check that file names are plain names that stay inside `target_dir`
    pub fn validate(&self) -> Result<()> {
        for (label, name) in [
            ("output file name", &self.output_file_name),
            ("log file name", &self.log_file_name),
        ] {
            if !is_plain_file_name(name) {
                return Err(EtlError::Configuration {
                    message: format!("{} must be a plain file name, got '{}'", label, name),
                });
            }
        }

        if self.output_file_name == self.log_file_name {
            return Err(EtlError::Configuration {
                message: "output file and log file must differ".to_string(),
            });
        }

        debug!(
            "Configuration: source={}, output={}, log={}",
            self.source_dir.display(),
            self.output_path().display(),
            self.log_path().display()
        );
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.file_name().is_some_and(|file| file == path.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = EtlConfig::new("/data/source", "/data/target");

        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/target/transformed_data.csv")
        );
        assert_eq!(config.log_path(), PathBuf::from("/data/target/log_file.txt"));
        assert!(config.print_transformed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = EtlConfig::new("in", "out")
            .with_output_file_name("people.csv")
            .with_log_file_name("run.log")
            .without_printing();

        assert_eq!(config.output_path(), PathBuf::from("out/people.csv"));
        assert_eq!(config.log_path(), PathBuf::from("out/run.log"));
        assert!(!config.print_transformed);
    }

    #[test]
    fn test_rejects_nested_file_names() {
        let config = EtlConfig::new("in", "out").with_output_file_name("../escape.csv");
        assert!(matches!(
            config.validate(),
            Err(EtlError::Configuration { .. })
        ));

        let config = EtlConfig::new("in", "out").with_log_file_name("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_shared_file_name() {
        let config = EtlConfig::new("in", "out")
            .with_output_file_name("same.txt")
            .with_log_file_name("same.txt");
        assert!(config.validate().is_err());
    }
}
