//! Main ETL engine.
//!
//! Runs the extract, transform and load phases strictly in sequence and
//! records each phase boundary in the progress log. Any error aborts the
//! run; progress lines already written are kept.

pub mod discovery;
pub mod extract;
pub mod readers;
pub mod transform;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, extract::Extractor, writer::DatasetWriter};

use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::models::{HEIGHT_COLUMN, JobStats, SourceFormat, WEIGHT_COLUMN};
use crate::progress_log::{ProgressEvent, ProgressLogger};

use colored::*;
use std::fs;
use std::time::Instant;
use tracing::{info, warn};

/// Main pipeline for a single ETL run
#[derive(Debug)]
pub struct EtlPipeline {
    config: EtlConfig,
    extractor: Extractor,
    writer: DatasetWriter,
    logger: ProgressLogger,
}

impl EtlPipeline {
    /// Create a new pipeline from configuration
    pub fn new(config: EtlConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            extractor: Extractor::new(FileDiscovery::new(config.source_dir.clone())),
            writer: DatasetWriter::new(config.output_path()),
            logger: ProgressLogger::new(config.log_path()),
            config,
        })
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Main processing entry point
    pub fn run(&self) -> Result<JobStats> {
        let start_time = Instant::now();
        info!(
            "Starting ETL job: {} -> {}",
            self.config.source_dir.display(),
            self.writer.output_path().display()
        );

        fs::create_dir_all(&self.config.target_dir)
            .map_err(|e| EtlError::io_failure(&self.config.target_dir, e))?;

        self.logger.record(ProgressEvent::JobStarted)?;

        // Extract
        self.logger.record(ProgressEvent::ExtractStarted)?;
        let (extracted, extraction) = self.extractor.extract()?;
        self.logger.record(ProgressEvent::ExtractEnded)?;

        if extraction.total_files() == 0 {
            warn!(
                "No .csv, .json or .xml files found in {}",
                self.config.source_dir.display()
            );
        }

        // Transform
        self.logger.record(ProgressEvent::TransformStarted)?;
        let transformed = transform::transform(&extracted)?;
        if self.config.print_transformed {
            println!("{}", "Transformed Data:".bright_green().bold());
            println!("{}", transformed);
        }
        self.logger.record(ProgressEvent::TransformEnded)?;

        // Load
        self.logger.record(ProgressEvent::LoadStarted)?;
        let rows_written = self.writer.write(&transformed)?;
        self.logger.record(ProgressEvent::LoadEnded)?;

        self.logger.record(ProgressEvent::JobEnded)?;

        let stats = JobStats {
            null_heights: transformed.null_count(HEIGHT_COLUMN)?,
            null_weights: transformed.null_count(WEIGHT_COLUMN)?,
            extraction,
            rows_written,
            output_path: self.writer.output_path().to_path_buf(),
            log_path: self.logger.path().to_path_buf(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "ETL job finished: {} rows written in {}ms",
            stats.rows_written, stats.processing_time_ms
        );
        Ok(stats)
    }
}

/// Print a run summary to stdout
pub fn report_summary(stats: &JobStats) {
    println!("\n{}", "ETL Summary".bright_green().bold());
    for format in SourceFormat::ALL {
        let counts = stats.extraction.get(format);
        println!(
            "  {} {} files, {} rows",
            format!("{}:", format).bright_cyan(),
            counts.files.to_string().bright_white(),
            counts.rows.to_string().bright_white()
        );
    }
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_written.to_string().bright_white().bold()
    );
    if stats.null_heights > 0 || stats.null_weights > 0 {
        println!(
            "  {} {} heights, {} weights",
            "Missing values:".bright_yellow(),
            stats.null_heights.to_string().bright_yellow(),
            stats.null_weights.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display()
    );
    println!("  {} {}", "Log:".bright_cyan(), stats.log_path.display());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
}
