//! Load phase
//!
//! Writes the transformed dataset as comma-delimited text with a header row,
//! replacing any previous output. Missing values are written as empty fields
//! and numbers in positional notation, never with an exponent.

use crate::error::{EtlError, Result};
use crate::models::Dataset;

use polars::prelude::{CsvWriter, SerWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV writer for the final dataset
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    output_path: PathBuf,
}

impl DatasetWriter {
    /// Create a new writer targeting `output_path`
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Overwrite the output file with `dataset`, returning the rows written
    pub fn write(&self, dataset: &Dataset) -> Result<usize> {
        let file = File::create(&self.output_path)
            .map_err(|e| EtlError::io_failure(&self.output_path, e))?;
        let mut buffer = BufWriter::new(file);

        let mut frame = dataset.frame().clone();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .with_separator(b',')
            .with_float_scientific(Some(false))
            .finish(&mut frame)
            .map_err(|e| EtlError::io_failure(&self.output_path, std::io::Error::other(e)))?;

        buffer
            .flush()
            .map_err(|e| EtlError::io_failure(&self.output_path, e))?;

        debug!(
            "Wrote {} rows to {}",
            frame.height(),
            self.output_path.display()
        );
        Ok(frame.height())
    }
}
