//! Core data structures for ETL runs.
//!
//! Defines the supported source formats, the `Dataset` wrapper that flows
//! between the extract, transform and load phases, and the run statistics
//! reported back to the caller.

use crate::error::Result;
use polars::df;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Column holding the subject name
pub const NAME_COLUMN: &str = "name";
/// Column holding height (inches when extracted, metres once transformed)
pub const HEIGHT_COLUMN: &str = "height";
/// Column holding weight (pounds when extracted, kilograms once transformed)
pub const WEIGHT_COLUMN: &str = "weight";

/// Output column order, also the header of the loaded file
pub const COLUMNS: [&str; 3] = [NAME_COLUMN, HEIGHT_COLUMN, WEIGHT_COLUMN];

/// Source file formats, in the order they are extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    Tabular,
    LineDelimited,
    Markup,
}

impl SourceFormat {
    /// Extraction order: tabular, then line-delimited, then markup
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::Tabular,
        SourceFormat::LineDelimited,
        SourceFormat::Markup,
    ];

    /// File extension (without the dot) claimed by this format
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Tabular => "csv",
            SourceFormat::LineDelimited => "json",
            SourceFormat::Markup => "xml",
        }
    }

    /// Detect format from a file extension. Matching is case sensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|format| format.extension() == ext)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Tabular => write!(f, "CSV"),
            SourceFormat::LineDelimited => write!(f, "JSON lines"),
            SourceFormat::Markup => write!(f, "XML"),
        }
    }
}

/// Ordered name/height/weight records backed by a polars `DataFrame`.
///
/// Extracted datasets keep `height` and `weight` as nullable text so numeric
/// coercion happens in one place; transformed datasets hold `Float64`.
#[derive(Debug, Clone)]
pub struct Dataset(DataFrame);

impl Dataset {
    /// Build an extracted dataset from raw column values
    pub fn from_raw(
        names: Vec<String>,
        heights: Vec<Option<String>>,
        weights: Vec<Option<String>>,
    ) -> Result<Self> {
        let frame = df!(
            NAME_COLUMN => names,
            HEIGHT_COLUMN => heights,
            WEIGHT_COLUMN => weights
        )?;
        Ok(Self(frame))
    }

    /// Build a transformed dataset from converted column values
    pub fn from_converted(
        names: Vec<String>,
        heights: Vec<Option<f64>>,
        weights: Vec<Option<f64>>,
    ) -> Result<Self> {
        let frame = df!(
            NAME_COLUMN => names,
            HEIGHT_COLUMN => heights,
            WEIGHT_COLUMN => weights
        )?;
        Ok(Self(frame))
    }

    /// An extracted dataset with no rows
    pub fn empty() -> Result<Self> {
        Self::from_raw(Vec::new(), Vec::new(), Vec::new())
    }

    pub(crate) fn from_frame(frame: DataFrame) -> Self {
        Self(frame)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.0
    }

    pub fn into_frame(self) -> DataFrame {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.0.height() == 0
    }

    /// Subject names in dataset order
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self
            .text_values(NAME_COLUMN)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }

    /// Values of a text column (extracted datasets)
    pub fn text_values(&self, column: &str) -> Result<Vec<Option<String>>> {
        let values = self
            .0
            .column(column)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        Ok(values)
    }

    /// Number of missing values in a column
    pub fn null_count(&self, column: &str) -> Result<usize> {
        Ok(self.0.column(column)?.null_count())
    }

    /// Values of a numeric column (transformed datasets)
    pub fn numeric_values(&self, column: &str) -> Result<Vec<Option<f64>>> {
        let values = self
            .0
            .column(column)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();
        Ok(values)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-format extraction counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSummary {
    pub files: usize,
    pub rows: usize,
}

/// What the extract phase read, per source format
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    pub tabular: FormatSummary,
    pub line_delimited: FormatSummary,
    pub markup: FormatSummary,
}

impl ExtractionSummary {
    pub fn get(&self, format: SourceFormat) -> &FormatSummary {
        match format {
            SourceFormat::Tabular => &self.tabular,
            SourceFormat::LineDelimited => &self.line_delimited,
            SourceFormat::Markup => &self.markup,
        }
    }

    pub(crate) fn get_mut(&mut self, format: SourceFormat) -> &mut FormatSummary {
        match format {
            SourceFormat::Tabular => &mut self.tabular,
            SourceFormat::LineDelimited => &mut self.line_delimited,
            SourceFormat::Markup => &mut self.markup,
        }
    }

    pub fn total_files(&self) -> usize {
        self.tabular.files + self.line_delimited.files + self.markup.files
    }

    pub fn total_rows(&self) -> usize {
        self.tabular.rows + self.line_delimited.rows + self.markup.rows
    }
}

/// Statistics for a completed ETL run
#[derive(Debug, Default)]
pub struct JobStats {
    pub extraction: ExtractionSummary,
    pub rows_written: usize,
    pub null_heights: usize,
    pub null_weights: usize,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub processing_time_ms: u128,
}
