//! Transform phase
//!
//! Coerces height and weight to numbers, converts inches to metres and
//! pounds to kilograms, and rounds both to two decimals. Column names are
//! left as `height` and `weight`.

use crate::error::Result;
use crate::models::{Dataset, HEIGHT_COLUMN, WEIGHT_COLUMN};
use polars::prelude::*;
use tracing::debug;

/// Metres per inch
pub const INCHES_TO_METRES: f64 = 0.0254;

/// Kilograms per pound
pub const POUNDS_TO_KILOGRAMS: f64 = 0.45359237;

/// Decimal places kept after conversion
pub const DECIMAL_PLACES: i32 = 2;

/// Parse a raw cell as a finite number; anything else is missing.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Magnitude (2^53) from which an `f64` has no fractional part left
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Round half away from zero to `places` decimals.
///
/// Values whose scaled magnitude reaches 2^53 are rounded to a whole number.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value.round();
    }
    scaled.round() / scale
}

pub fn inches_to_metres(inches: f64) -> f64 {
    round_to(inches * INCHES_TO_METRES, DECIMAL_PLACES)
}

pub fn pounds_to_kilograms(pounds: f64) -> f64 {
    round_to(pounds * POUNDS_TO_KILOGRAMS, DECIMAL_PLACES)
}

/// Produce a new dataset with converted, rounded numeric columns
pub fn transform(dataset: &Dataset) -> Result<Dataset> {
    let names = dataset.names()?;
    let heights_m = convert_column(dataset, HEIGHT_COLUMN, inches_to_metres)?;
    let weights_kg = convert_column(dataset, WEIGHT_COLUMN, pounds_to_kilograms)?;

    let transformed = Dataset::from_converted(names, heights_m, weights_kg)?;
    debug!(
        "Transformed {} rows ({} null heights, {} null weights)",
        transformed.len(),
        transformed.null_count(HEIGHT_COLUMN)?,
        transformed.null_count(WEIGHT_COLUMN)?
    );
    Ok(transformed)
}

fn convert_column(
    dataset: &Dataset,
    column: &str,
    convert: impl Fn(f64) -> f64,
) -> Result<Vec<Option<f64>>> {
    let cells = dataset.frame().column(column)?.cast(&DataType::String)?;
    let values = cells
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(coerce_numeric).map(&convert))
        .collect();
    Ok(values)
}
