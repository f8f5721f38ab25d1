use std::path::Path;

use csv::ReaderBuilder;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;

/// One survey response, as the ordered cell values of a spreadsheet row.
#[derive(Debug, Clone)]
pub struct ResponseRow {
    cells: Vec<String>,
}

impl ResponseRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell value at `idx`, or the empty string if the row is short.
    /// A blank cell is the export's missing-value marker.
    pub fn get(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The full row as a header-keyed mapping, preserving column order.
    pub fn to_map(&self, headers: &[String]) -> Map<String, Value> {
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), Value::String(self.get(i).to_string())))
            .collect()
    }
}

/// In-memory copy of a survey export: the header row plus all data rows,
/// in file order.
#[derive(Debug)]
pub struct SurveyTable {
    headers: Vec<String>,
    rows: Vec<ResponseRow>,
}

impl SurveyTable {
    /// Load the export at `path` (CSV form of the first sheet, header row
    /// present). All rows are read into memory up front.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path.as_ref())?;

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(ResponseRow::new(
                record.iter().map(str::to_string).collect(),
            ));
        }

        debug!(
            "Loaded {} rows ({} columns) from {}",
            rows.len(),
            headers.len(),
            path.as_ref().display()
        );

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }
}
