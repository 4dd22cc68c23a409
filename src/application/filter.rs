// ============================================================
// PLOT-DATA FILTERING
// ============================================================
// Derives the finite point set the plotting surface consumes: row
// limit first, then per-axis range filters. Never mutates the dataset.

use crate::domain::csv::{CellValue, Dataset};
use crate::domain::error::{AppError, Result};
use crate::domain::plot::PlotConfig;
use serde::{Deserialize, Serialize};

/// Row limit applied when a configuration does not set one.
pub const DEFAULT_MAX_ROWS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Produce the scatter-plot points for a classified dataset under a
/// plot configuration. Rows whose x or y cell is not numeric are
/// skipped; an unset range means unbounded.
pub fn filter_points(dataset: &Dataset, config: &PlotConfig) -> Result<Vec<PlotPoint>> {
    let x_name = config
        .x_column
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("x_column is required".to_string()))?;
    let y_name = config
        .y_column
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("y_column is required".to_string()))?;

    let x = dataset
        .column_index(x_name)
        .ok_or_else(|| AppError::NotFound(format!("Column '{}' not found", x_name)))?;
    let y = dataset
        .column_index(y_name)
        .ok_or_else(|| AppError::NotFound(format!("Column '{}' not found", y_name)))?;

    let max_rows = config.max_rows.unwrap_or(DEFAULT_MAX_ROWS).max(0) as usize;
    let x_range = config.x_range();
    let y_range = config.y_range();

    let points = dataset
        .rows
        .iter()
        .take(max_rows)
        .filter_map(|row| {
            let px = row.get(x).and_then(CellValue::as_number)?;
            let py = row.get(y).and_then(CellValue::as_number)?;
            (in_range(px, x_range) && in_range(py, y_range)).then_some(PlotPoint { x: px, y: py })
        })
        .collect();

    Ok(points)
}

fn in_range(value: f64, range: Option<(f64, f64)>) -> bool {
    range.map_or(true, |(min, max)| value >= min && value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec![
                    CellValue::Number(1.0),
                    CellValue::Number(10.0),
                    CellValue::Text("x".to_string()),
                ],
                vec![
                    CellValue::Number(2.0),
                    CellValue::Number(20.0),
                    CellValue::Text("y".to_string()),
                ],
                vec![
                    CellValue::Number(3.0),
                    CellValue::Number(30.0),
                    CellValue::Text("z".to_string()),
                ],
                vec![
                    CellValue::Text("n/a".to_string()),
                    CellValue::Number(40.0),
                    CellValue::Missing,
                ],
            ],
        )
    }

    fn config(x: &str, y: &str) -> PlotConfig {
        PlotConfig {
            x_column: Some(x.to_string()),
            y_column: Some(y.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_numeric_rows_become_points() {
        let points = filter_points(&dataset(), &config("a", "b")).unwrap();
        assert_eq!(
            points,
            vec![
                PlotPoint { x: 1.0, y: 10.0 },
                PlotPoint { x: 2.0, y: 20.0 },
                PlotPoint { x: 3.0, y: 30.0 },
            ]
        );
    }

    #[test]
    fn test_max_rows_limits_before_filtering() {
        let mut cfg = config("a", "b");
        cfg.max_rows = Some(2);
        let points = filter_points(&dataset(), &cfg).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_range_filters_apply_to_both_axes() {
        let mut cfg = config("a", "b");
        cfg.x_range_min = Some(2.0);
        cfg.x_range_max = Some(3.0);
        cfg.y_range_min = Some(0.0);
        cfg.y_range_max = Some(25.0);
        let points = filter_points(&dataset(), &cfg).unwrap();
        assert_eq!(points, vec![PlotPoint { x: 2.0, y: 20.0 }]);
    }

    #[test]
    fn test_non_numeric_cells_are_skipped() {
        // Row 4 has text in column a
        let points = filter_points(&dataset(), &config("a", "b")).unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let err = filter_points(&dataset(), &config("a", "nope")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_missing_axis_selection_is_an_error() {
        let err = filter_points(&dataset(), &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
