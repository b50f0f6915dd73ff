//! Extract phase
//!
//! Reads every discovered source file and concatenates the results into one
//! dataset: tabular files first, then line-delimited, then markup; file-name
//! order within each format.

use super::discovery::FileDiscovery;
use super::readers::read_source_file;

use crate::error::Result;
use crate::models::{Dataset, ExtractionSummary};

use polars::prelude::*;
use tracing::{debug, info};

/// Extraction aggregator over a source directory
#[derive(Debug, Clone)]
pub struct Extractor {
    discovery: FileDiscovery,
}

impl Extractor {
    pub fn new(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Read all source files into a single extracted dataset
    pub fn extract(&self) -> Result<(Dataset, ExtractionSummary)> {
        self.discovery.ensure_available()?;

        let mut frames = Vec::new();
        let mut summary = ExtractionSummary::default();

        for (format, files) in self.discovery.discover_all()? {
            for file in files {
                let dataset = read_source_file(format, &file)?;

                let counts = summary.get_mut(format);
                counts.files += 1;
                counts.rows += dataset.len();

                frames.push(dataset.into_frame().lazy());
            }

            let counts = summary.get(format);
            if counts.files > 0 {
                info!(
                    "Extracted {} rows from {} {} files",
                    counts.rows, counts.files, format
                );
            }
        }

        if frames.is_empty() {
            debug!(
                "No source files found in {}",
                self.discovery.source_dir().display()
            );
            return Ok((Dataset::empty()?, summary));
        }

        let combined = concat(frames, UnionArgs::default())?.collect()?;
        Ok((Dataset::from_frame(combined), summary))
    }
}
