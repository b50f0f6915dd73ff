//! Format readers.
//!
//! Each reader parses one source file into an extracted `Dataset` with the
//! `name`, `height`, `weight` columns. Numeric cells are kept as text; the
//! transform phase owns coercion.

pub mod line_delimited;
pub mod markup;
pub mod tabular;

use crate::error::Result;
use crate::models::{Dataset, SourceFormat};
use std::path::Path;

pub use line_delimited::read_line_delimited;
pub use markup::read_markup;
pub use tabular::read_tabular;

/// Read one source file with the reader for its format
pub fn read_source_file(format: SourceFormat, path: &Path) -> Result<Dataset> {
    match format {
        SourceFormat::Tabular => read_tabular(path),
        SourceFormat::LineDelimited => read_line_delimited(path),
        SourceFormat::Markup => read_markup(path),
    }
}
