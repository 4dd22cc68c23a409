use serde::{Deserialize, Serialize};

/// Axis and filtering configuration attached to a dataset: which two
/// columns to plot, how many rows to keep, and optional per-axis value
/// ranges. All fields are optional because a saved file may carry a
/// partial configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub max_rows: Option<i64>,
    pub x_range_min: Option<f64>,
    pub x_range_max: Option<f64>,
    pub y_range_min: Option<f64>,
    pub y_range_max: Option<f64>,
}

impl PlotConfig {
    /// X-axis range filter, present only when both bounds are set.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match (self.x_range_min, self.x_range_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Y-axis range filter, present only when both bounds are set.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        match (self.y_range_min, self.y_range_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_column.is_none()
            && self.y_column.is_none()
            && self.max_rows.is_none()
            && self.x_range_min.is_none()
            && self.x_range_max.is_none()
            && self.y_range_min.is_none()
            && self.y_range_max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_requires_both_bounds() {
        let config = PlotConfig {
            x_range_min: Some(1.0),
            ..Default::default()
        };
        assert_eq!(config.x_range(), None);

        let config = PlotConfig {
            x_range_min: Some(1.0),
            x_range_max: Some(5.0),
            ..Default::default()
        };
        assert_eq!(config.x_range(), Some((1.0, 5.0)));
    }

    #[test]
    fn test_is_empty() {
        assert!(PlotConfig::default().is_empty());
        let config = PlotConfig {
            max_rows: Some(100),
            ..Default::default()
        };
        assert!(!config.is_empty());
    }
}
