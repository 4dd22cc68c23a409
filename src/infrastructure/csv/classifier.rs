// ============================================================
// COLUMN CLASSIFIER & SUMMARIZER
// ============================================================
// Numeric-column detection, value coercion and per-column ranges

use crate::domain::csv::{CellValue, ColumnRange, Dataset, IngestConfig};
use crate::domain::error::{AppError, Result};
use std::collections::BTreeMap;

/// Classifier output: the coerced dataset (full rows retained), the
/// columns that classified numeric, and their observed ranges. This is
/// the stable contract filtering and plotting consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub dataset: Dataset,
    pub numeric_columns: Vec<String>,
    pub ranges: BTreeMap<String, ColumnRange>,
}

/// Classify columns as numeric or not, coerce numeric-looking text in
/// numeric columns, and compute per-column min/max ranges.
///
/// Classification is statistical: a column qualifies when at least
/// `numeric_threshold` of its sampled values parse as numbers, so a
/// mostly-numeric column with a few text entries still counts. Text
/// that fails to parse survives coercion; consumers must tolerate
/// mixed columns. The whole operation is idempotent.
pub fn classify(dataset: Dataset, config: &IngestConfig) -> Result<Classified> {
    let columns = dataset.columns;
    let mut rows: Vec<Vec<CellValue>> = dataset
        .rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.is_missing()))
        .collect();

    if rows.is_empty() {
        return Err(AppError::ClassificationError(
            "No valid data rows found".to_string(),
        ));
    }

    let numeric_indexes: Vec<usize> = (0..columns.len())
        .filter(|&col| {
            let sample: Vec<&CellValue> = rows
                .iter()
                .filter_map(|row| row.get(col))
                .filter(|cell| !cell.is_missing())
                .take(config.numeric_sample_size)
                .collect();

            if sample.is_empty() {
                return false;
            }

            let numeric = sample.iter().filter(|cell| cell.is_numeric_like()).count();
            numeric as f64 / sample.len() as f64 >= config.numeric_threshold
        })
        .collect();

    let numeric_columns: Vec<String> = numeric_indexes
        .iter()
        .map(|&col| columns[col].clone())
        .collect();

    if numeric_columns.len() < 2 {
        return Err(AppError::ClassificationError(format!(
            "Need at least 2 numeric columns. Found {}: {}. All columns: {}",
            numeric_columns.len(),
            numeric_columns.join(", "),
            columns.join(", ")
        )));
    }

    // Coerce numeric-looking text to numbers in numeric columns
    for row in rows.iter_mut() {
        for &col in &numeric_indexes {
            if let Some(cell) = row.get_mut(col) {
                if let CellValue::Text(s) = cell {
                    if let Ok(n) = s.parse::<f64>() {
                        if n.is_finite() {
                            *cell = CellValue::Number(n);
                        }
                    }
                }
            }
        }
    }

    let mut ranges = BTreeMap::new();
    for &col in &numeric_indexes {
        let mut observed: Option<ColumnRange> = None;
        for row in &rows {
            if let Some(n) = row.get(col).and_then(CellValue::as_number) {
                observed = Some(match observed {
                    Some(range) => ColumnRange {
                        min: range.min.min(n),
                        max: range.max.max(n),
                    },
                    None => ColumnRange { min: n, max: n },
                });
            }
        }
        // Columns with zero actual numeric values are left out
        if let Some(range) = observed {
            ranges.insert(columns[col].clone(), range);
        }
    }

    Ok(Classified {
        dataset: Dataset::new(columns, rows),
        numeric_columns,
        ranges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::structured;

    fn classify_content(content: &str) -> Result<Classified> {
        let ds = structured::parse_with_delimiter(content, b',').unwrap();
        classify(ds, &IngestConfig::default())
    }

    #[test]
    fn test_scenario_two_numeric_one_text() {
        let out = classify_content("a,b,c\n1,2,x\n3,4,y\n5,6,z\n").unwrap();
        assert_eq!(out.numeric_columns, vec!["a", "b"]);
        assert_eq!(out.dataset.row_count(), 3);
        assert_eq!(
            out.ranges["a"],
            ColumnRange { min: 1.0, max: 5.0 }
        );
        assert_eq!(
            out.ranges["b"],
            ColumnRange { min: 2.0, max: 6.0 }
        );
        assert!(!out.ranges.contains_key("c"));
    }

    #[test]
    fn test_insufficient_numeric_columns_lists_both_sets() {
        let err = classify_content("id,label\n1,foo\n2,bar\n3,baz\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Found 1: id"));
        assert!(message.contains("All columns: id, label"));
    }

    #[test]
    fn test_mostly_numeric_column_still_qualifies() {
        // 3 of 4 sampled values are numeric: fraction 0.75 >= 0.7
        let out = classify_content("a,b\n1,1\n2,2\nn/a,3\n4,4\n").unwrap();
        assert_eq!(out.numeric_columns, vec!["a", "b"]);
        // The unparseable entry survives coercion as text
        assert_eq!(out.dataset.rows[2][0], CellValue::Text("n/a".to_string()));
        // Ranges only cover actual numbers
        assert_eq!(out.ranges["a"], ColumnRange { min: 1.0, max: 4.0 });
    }

    #[test]
    fn test_classification_is_idempotent() {
        let first = classify_content("a,b,c\n1,2,x\n3,4,y\n5,6,z\n").unwrap();
        let second = classify(first.dataset.clone(), &IngestConfig::default()).unwrap();
        assert_eq!(first.numeric_columns, second.numeric_columns);
        assert_eq!(first.ranges, second.ranges);
        assert_eq!(first.dataset, second.dataset);
    }

    #[test]
    fn test_range_invariant_bounds_every_value() {
        let out = classify_content("a,b\n5,10\n-3,2\n8,7\n").unwrap();
        for (name, range) in &out.ranges {
            let col = out.dataset.column_index(name).unwrap();
            assert!(range.min <= range.max);
            for row in &out.dataset.rows {
                if let Some(n) = row[col].as_number() {
                    assert!(range.min <= n && n <= range.max);
                }
            }
        }
    }

    #[test]
    fn test_rows_of_only_missing_fields_are_dropped() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Number(1.0), CellValue::Number(2.0)],
                vec![CellValue::Missing, CellValue::Missing],
                vec![CellValue::Number(3.0), CellValue::Number(4.0)],
            ],
        );
        let out = classify(ds, &IngestConfig::default()).unwrap();
        assert_eq!(out.dataset.row_count(), 2);
    }

    #[test]
    fn test_all_rows_empty_fails() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![CellValue::Missing, CellValue::Missing]],
        );
        let err = classify(ds, &IngestConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No valid data rows"));
    }

    #[test]
    fn test_sampling_stops_at_sample_size() {
        // First 10 non-missing values of column b are numeric; text
        // beyond the sample window must not affect classification.
        let mut content = String::from("a,b\n");
        for i in 0..10 {
            content.push_str(&format!("{},{}\n", i, i));
        }
        content.push_str("10,not-a-number\n");
        let out = classify_content(&content).unwrap();
        assert_eq!(out.numeric_columns, vec!["a", "b"]);
    }
}
