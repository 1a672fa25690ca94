//! Raw tabular input, read from CSV or JSON bytes.

use serde_json::Value;
use std::path::Path;

use super::fields::Field;
use crate::error::{Result, RosterError};

/// One input cell before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
}

impl CellValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            other => CellValue::Text(other.to_string()),
        }
    }

    fn from_csv(field: &str) -> Self {
        if field.trim().is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(field.to_string())
        }
    }
}

/// Supported roster encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// A JSON array of objects, or one object per line
    Json,
}

impl InputFormat {
    /// Pick the format from the locator's extension, ignoring any URL query or fragment
    pub fn from_locator(locator: &str) -> Self {
        let path = locator.split(['?', '#']).next().unwrap_or(locator);
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") | Some("jsonl") | Some("ndjson") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Rows of cells under arbitrary headers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse raw bytes in the given format. `locator` is only used for error context.
    pub fn parse(bytes: &[u8], format: InputFormat, locator: &str) -> Result<Self> {
        match format {
            InputFormat::Csv => Self::from_csv(bytes, locator),
            InputFormat::Json => Self::from_json(bytes, locator),
        }
    }

    pub fn from_csv(bytes: &[u8], locator: &str) -> Result<Self> {
        let csv_error = |source| RosterError::Csv {
            locator: locator.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut table = RawTable::new(headers);
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            table.rows.push(record.iter().map(CellValue::from_csv).collect());
        }

        log::debug!("Read {} CSV rows from {}", table.len(), locator);
        Ok(table)
    }

    pub fn from_json(bytes: &[u8], locator: &str) -> Result<Self> {
        let json_error = |line, source| RosterError::Json {
            locator: locator.to_string(),
            line,
            source,
        };

        let text = String::from_utf8_lossy(bytes);
        let values: Vec<Value> = if text.trim_start().starts_with('[') {
            serde_json::from_str(&text).map_err(|e| json_error(e.line(), e))?
        } else {
            let mut values = Vec::new();
            for (idx, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                values.push(serde_json::from_str(line).map_err(|e| json_error(idx + 1, e))?);
            }
            values
        };

        let mut objects = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match value {
                Value::Object(map) => objects.push(map),
                _ => {
                    return Err(RosterError::NotAnObject {
                        locator: locator.to_string(),
                        row: idx + 1,
                    })
                }
            }
        }

        // Keys naming a known field share one canonical column, whatever their spelling
        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<(usize, CellValue)>> = Vec::with_capacity(objects.len());
        for (idx, obj) in objects.iter().enumerate() {
            let mut row: Vec<(usize, CellValue)> = Vec::with_capacity(obj.len());
            for (key, value) in obj {
                let header = match Field::from_header(key) {
                    Some(field) => field.canonical_name(),
                    None => key.as_str(),
                };
                let col = match headers.iter().position(|h| h == header) {
                    Some(col) => col,
                    None => {
                        headers.push(header.to_string());
                        headers.len() - 1
                    }
                };

                if row.iter().any(|(c, _)| *c == col) {
                    log::warn!(
                        "Row {} key '{}' duplicates column {}, ignoring it",
                        idx + 1,
                        key,
                        header
                    );
                    continue;
                }
                row.push((col, CellValue::from_json(value)));
            }
            rows.push(row);
        }

        let mut table = RawTable::new(headers);
        for cells in rows {
            let mut row = vec![CellValue::Null; table.headers.len()];
            for (col, cell) in cells {
                row[col] = cell;
            }
            table.rows.push(row);
        }

        log::debug!("Read {} JSON rows from {}", table.len(), locator);
        Ok(table)
    }
}
