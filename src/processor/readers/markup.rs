//! XML reader.
//!
//! Expects a root element whose children are records:
//!
//! ```text
//! <people>
//!   <person>
//!     <name>Alice</name>
//!     <height>64</height>
//!     <weight>150</weight>
//!   </person>
//! </people>
//! ```
//!
//! Tag names of the root and record elements are not checked. Unlike the
//! other readers, height and weight are validated as numbers here and a bad
//! value fails the file.

use crate::error::{EtlError, Result};
use crate::models::{Dataset, HEIGHT_COLUMN, NAME_COLUMN, WEIGHT_COLUMN};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

const ROOT_DEPTH: usize = 1;
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Height,
    Weight,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Field::Name),
            b"height" => Some(Field::Height),
            b"weight" => Some(Field::Weight),
            _ => None,
        }
    }
}

/// Field text collected for one record element
#[derive(Debug, Default)]
struct PendingRecord {
    name: Option<String>,
    height: Option<String>,
    weight: Option<String>,
}

impl PendingRecord {
    /// First occurrence of a field wins
    fn set(&mut self, field: Field, text: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }
}

/// Collects finished records into columns
struct Columns<'a> {
    path: &'a Path,
    names: Vec<String>,
    heights: Vec<Option<String>>,
    weights: Vec<Option<String>>,
}

impl<'a> Columns<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            names: Vec::new(),
            heights: Vec::new(),
            weights: Vec::new(),
        }
    }

    fn push(&mut self, record: PendingRecord) -> Result<()> {
        let index = self.names.len() + 1;
        let name = record
            .name
            .ok_or_else(|| EtlError::missing_field(self.path, NAME_COLUMN))?;
        let height = record
            .height
            .ok_or_else(|| EtlError::missing_field(self.path, HEIGHT_COLUMN))?;
        let weight = record
            .weight
            .ok_or_else(|| EtlError::missing_field(self.path, WEIGHT_COLUMN))?;

        let height = self.validate_number(index, HEIGHT_COLUMN, &height)?;
        let weight = self.validate_number(index, WEIGHT_COLUMN, &weight)?;

        self.names.push(name);
        self.heights.push(Some(height));
        self.weights.push(Some(weight));
        Ok(())
    }

    fn validate_number(&self, index: usize, field: &str, text: &str) -> Result<String> {
        let trimmed = text.trim();
        trimmed.parse::<f64>().map_err(|_| {
            EtlError::malformed(
                self.path,
                format!("record {}: {} '{}' is not a number", index, field, text),
            )
        })?;
        Ok(trimmed.to_string())
    }
}

/// Read an XML file into one record per child of the root element
pub fn read_markup(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path).map_err(|e| EtlError::io_failure(path, e))?;
    let columns = parse_records(path, &content)?;

    debug!("Read {} records from {}", columns.names.len(), path.display());
    Dataset::from_raw(columns.names, columns.heights, columns.weights)
}

fn parse_records<'a>(path: &'a Path, content: &str) -> Result<Columns<'a>> {
    let mut reader = Reader::from_str(content);
    let mut columns = Columns::new(path);

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;
    let mut record: Option<PendingRecord> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed_at(path, reader.buffer_position(), e))?;

        if root_closed && !allowed_after_root(&event) {
            return Err(malformed_at(
                path,
                reader.buffer_position(),
                "content after root element",
            ));
        }

        match event {
            Event::Start(element) => {
                depth += 1;
                match depth {
                    ROOT_DEPTH => seen_root = true,
                    RECORD_DEPTH => record = Some(PendingRecord::default()),
                    FIELD_DEPTH => {
                        field = Field::from_tag(element.local_name().as_ref());
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Empty(element) => match depth + 1 {
                ROOT_DEPTH => {
                    seen_root = true;
                    root_closed = true;
                }
                RECORD_DEPTH => columns.push(PendingRecord::default())?,
                FIELD_DEPTH => {
                    if let (Some(field), Some(record)) =
                        (Field::from_tag(element.local_name().as_ref()), record.as_mut())
                    {
                        record.set(field, String::new());
                    }
                }
                _ => {}
            },
            Event::Text(chunk) => {
                if depth == FIELD_DEPTH && field.is_some() {
                    let unescaped = chunk
                        .unescape()
                        .map_err(|e| malformed_at(path, reader.buffer_position(), e))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(chunk) => {
                if depth == FIELD_DEPTH && field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&chunk.into_inner()));
                }
            }
            Event::End(_) => {
                match depth {
                    RECORD_DEPTH => {
                        if let Some(finished) = record.take() {
                            columns.push(finished)?;
                        }
                    }
                    FIELD_DEPTH => {
                        if let (Some(field), Some(record)) = (field.take(), record.as_mut()) {
                            record.set(field, std::mem::take(&mut text));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(malformed_at(path, reader.buffer_position(), "no root element found"));
    }
    if depth != 0 {
        return Err(malformed_at(path, reader.buffer_position(), "unexpected end of document"));
    }

    Ok(columns)
}

/// Only whitespace, comments and processing instructions may follow the root
fn allowed_after_root(event: &Event<'_>) -> bool {
    match event {
        Event::Text(chunk) => chunk.iter().all(u8::is_ascii_whitespace),
        Event::Comment(_) | Event::PI(_) | Event::Eof => true,
        _ => false,
    }
}

fn malformed_at(path: &Path, position: impl fmt::Display, reason: impl fmt::Display) -> EtlError {
    EtlError::malformed(path, format!("at byte {}: {}", position, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("people.xml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_records_in_document_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            r#"<?xml version="1.0"?>
<data>
    <person>
        <name>Frank</name>
        <height>68.7</height>
        <weight>162.2</weight>
    </person>
    <person>
        <weight>120</weight>
        <name>Grace &amp; Co</name>
        <height> 61 </height>
        <nickname>G</nickname>
    </person>
</data>"#,
        );

        let dataset = read_markup(&path).unwrap();

        assert_eq!(dataset.names().unwrap(), vec!["Frank", "Grace & Co"]);
        assert_eq!(
            dataset.text_values(HEIGHT_COLUMN).unwrap(),
            vec![Some("68.7".to_string()), Some("61".to_string())]
        );
        assert_eq!(
            dataset.text_values(WEIGHT_COLUMN).unwrap(),
            vec![Some("162.2".to_string()), Some("120".to_string())]
        );
    }

    #[test]
    fn test_name_whitespace_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "<data><person><name> Hal </name><height>70</height><weight>170</weight></person></data>",
        );

        let dataset = read_markup(&path).unwrap();
        assert_eq!(dataset.names().unwrap(), vec![" Hal "]);
    }

    #[test]
    fn test_missing_weight_element() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            r#"<data>
    <person><name>Ivy</name><height>65</height><weight>130</weight></person>
    <person><name>Jack</name><height>71</height></person>
</data>"#,
        );

        match read_markup(&path) {
            Err(EtlError::MissingField { field, .. }) => assert_eq!(field, "weight"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_height() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "<data><person><name>Kim</name><height>tall</height><weight>130</weight></person></data>",
        );

        match read_markup(&path) {
            Err(EtlError::MalformedInput { reason, .. }) => {
                assert!(reason.contains("height 'tall' is not a number"))
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_weight_element() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "<data><person><name>Lee</name><height>60</height><weight/></person></data>",
        );

        assert!(matches!(
            read_markup(&path),
            Err(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_mismatched_tags() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "<data><person><name>Max</height></person></data>",
        );

        assert!(matches!(
            read_markup(&path),
            Err(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_multiple_root_elements() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            concat!(
                "<a><p><name>A</name><height>1</height><weight>2</weight></p></a>\n",
                "<b><p><name>B</name><height>3</height><weight>4</weight></p></b>",
            ),
        );

        match read_markup(&path) {
            Err(EtlError::MalformedInput { reason, .. }) => {
                assert!(reason.contains("content after root element"))
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_text_after_root_element() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "<data/>trailing");

        assert!(matches!(
            read_markup(&path),
            Err(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_whitespace_and_comment_after_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "<data><p><name>A</name><height>1</height><weight>2</weight></p></data>\n<!-- end -->\n",
        );

        assert_eq!(read_markup(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "");

        assert!(matches!(
            read_markup(&path),
            Err(EtlError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_root_without_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "<data/>");

        assert!(read_markup(&path).unwrap().is_empty());
    }
}
