//! CSV reader.

use crate::error::{EtlError, Result};
use crate::models::{COLUMNS, Dataset};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read a comma-delimited file with a header row containing at least
/// `name`, `height` and `weight`.
///
/// Every column is read as text (schema inference disabled) so values reach
/// the transform phase untouched. Extra columns are dropped.
pub fn read_tabular(path: &Path) -> Result<Dataset> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| EtlError::malformed(path, e.to_string()))?;

    let present = frame.get_column_names_str();
    if let Some(missing) = COLUMNS.into_iter().find(|column| !present.contains(column)) {
        return Err(EtlError::missing_field(path, missing));
    }

    let frame = frame.select(COLUMNS)?;
    debug!("Read {} rows from {}", frame.height(), path.display());
    Ok(Dataset::from_frame(frame))
}
