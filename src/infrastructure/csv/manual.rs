// ============================================================
// MANUAL RECOVERY PARSER
// ============================================================
// Last-resort line splitter for files no structured hypothesis accepts

use crate::domain::csv::{CellValue, Dataset};
use crate::domain::error::{AppError, Result};

/// Delimiters considered during detection, in tie-break priority order.
pub const DELIMITER_CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Pick the delimiter that splits the first line into the most fields.
/// Ties keep the earlier candidate (comma first). Heuristic only: a
/// quoted field containing delimiter characters will fool it.
pub fn detect_delimiter(first_line: &str) -> char {
    let mut delimiter = ',';
    let mut max_fields = 0;

    for candidate in DELIMITER_CANDIDATES {
        let fields = first_line.split(candidate).count();
        if fields > max_fields {
            max_fields = fields;
            delimiter = candidate;
        }
    }

    delimiter
}

/// Parse text content by hand: detect the delimiter from the first
/// line, take that line as the header, and zip every following line to
/// the header positionally. Headers are trimmed and stripped of double
/// quotes but otherwise used verbatim — unlike the structured path,
/// which sanitizes them. Missing trailing fields become `Missing`;
/// extra fields are dropped.
pub fn parse(content: &str) -> Result<Dataset> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AppError::RecoveryError(
            "No content lines found".to_string(),
        ));
    }

    let delimiter = detect_delimiter(lines[0]);

    let columns: Vec<String> = lines[0]
        .split(delimiter)
        .map(|field| field.trim().replace('"', ""))
        .collect();

    if columns.is_empty() {
        return Err(AppError::RecoveryError("No columns found".to_string()));
    }

    let rows = lines[1..]
        .iter()
        .map(|line| {
            let values: Vec<String> = line
                .split(delimiter)
                .map(|field| field.trim().replace('"', ""))
                .collect();

            (0..columns.len())
                .map(|i| match values.get(i) {
                    Some(value) => CellValue::from_raw(value),
                    None => CellValue::Missing,
                })
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}
