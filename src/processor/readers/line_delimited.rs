//! JSON-lines reader.

use crate::error::{EtlError, Result};
use crate::models::Dataset;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One line of a JSON-lines source
#[derive(Debug, Deserialize)]
struct LineRecord {
    name: Option<String>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    weight: Option<Value>,
}

/// Read a file holding one JSON object per line.
///
/// Any line that fails to parse aborts the whole file. Blank lines are
/// skipped. Numbers keep their JSON text; strings pass through unchanged.
pub fn read_line_delimited(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path).map_err(|e| EtlError::io_failure(path, e))?;

    let mut names = Vec::new();
    let mut heights = Vec::new();
    let mut weights = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: LineRecord = serde_json::from_str(line)
            .map_err(|e| EtlError::malformed(path, format!("line {}: {}", line_number, e)))?;

        let name = record
            .name
            .ok_or_else(|| EtlError::missing_field(path, "name"))?;

        names.push(name);
        heights.push(raw_text(record.height));
        weights.push(raw_text(record.weight));
    }

    debug!("Read {} records from {}", names.len(), path.display());
    Dataset::from_raw(names, heights, weights)
}

/// Textual form of a JSON value; `null` and absent keys become missing
fn raw_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HEIGHT_COLUMN, WEIGHT_COLUMN};
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("people.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            concat!(
                "{\"name\": \"Carol\", \"height\": 66.5, \"weight\": 140}\n",
                "{\"name\": \"Dan\", \"height\": 72, \"weight\": 200}\n",
            ),
        );

        let dataset = read_line_delimited(&path).unwrap();

        assert_eq!(dataset.names().unwrap(), vec!["Carol", "Dan"]);
        assert_eq!(
            dataset.text_values(HEIGHT_COLUMN).unwrap(),
            vec![Some("66.5".to_string()), Some("72".to_string())]
        );
        assert_eq!(
            dataset.text_values(WEIGHT_COLUMN).unwrap(),
            vec![Some("140".to_string()), Some("200".to_string())]
        );
    }

    #[test]
    fn test_string_and_null_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "{\"name\": \"Eve\", \"height\": \"unknown\", \"weight\": null}\n\n",
        );

        let dataset = read_line_delimited(&path).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.text_values(HEIGHT_COLUMN).unwrap(),
            vec![Some("unknown".to_string())]
        );
        assert_eq!(dataset.text_values(WEIGHT_COLUMN).unwrap(), vec![None]);
    }

    #[test]
    fn test_invalid_line_fails_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "{\"name\": \"Carol\", \"height\": 66, \"weight\": 140}\n{not json}\n",
        );

        match read_line_delimited(&path) {
            Err(EtlError::MalformedInput { reason, .. }) => assert!(reason.starts_with("line 2")),
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "[1, 2, 3]\n");

        assert!(matches!(
            read_line_delimited(&path),
            Err(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_missing_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "{\"height\": 66, \"weight\": 140}\n");

        match read_line_delimited(&path) {
            Err(EtlError::MissingField { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "");

        assert!(read_line_delimited(&path).unwrap().is_empty());
    }
}
