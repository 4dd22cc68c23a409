use super::CellValue;
use serde::{Deserialize, Serialize};

/// Raw uploaded file after validation and decoding.
///
/// Owned by the ingestion run that produced it; superseded wholesale by
/// the next upload.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub size: u64,
    pub content: String,
}

/// A rectangular table produced by exactly one successful parse
/// strategy. Rows are positionally aligned with `columns`; ragged input
/// rows are padded with `Missing` (or truncated) at parse time so the
/// schema is uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Observed [min, max] of the numeric values in one column. Bounds the
/// axis-range filter controls downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}
