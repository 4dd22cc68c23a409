use serde::{Deserialize, Serialize};

/// A single parsed cell value.
///
/// Construction never fails: anything that does not parse as a finite
/// number stays text, and empty fields become `Missing`. `Missing`
/// serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Build a cell from a raw field: trim, empty becomes `Missing`,
    /// finite numbers become `Number`, everything else stays `Text`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric value if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this cell counts as numeric for column classification:
    /// an actual number, or text that parses as a finite number.
    pub fn is_numeric_like(&self) -> bool {
        match self {
            CellValue::Number(_) => true,
            CellValue::Text(s) => matches!(s.parse::<f64>(), Ok(n) if n.is_finite()),
            CellValue::Missing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_number() {
        assert_eq!(CellValue::from_raw("42.5"), CellValue::Number(42.5));
        assert_eq!(CellValue::from_raw(" 7 "), CellValue::Number(7.0));
    }

    #[test]
    fn test_from_raw_text() {
        assert_eq!(
            CellValue::from_raw("hello"),
            CellValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_from_raw_empty_is_missing() {
        assert_eq!(CellValue::from_raw(""), CellValue::Missing);
        assert_eq!(CellValue::from_raw("   "), CellValue::Missing);
    }

    #[test]
    fn test_nan_stays_text() {
        assert_eq!(
            CellValue::from_raw("NaN"),
            CellValue::Text("NaN".to_string())
        );
        assert!(!CellValue::Text("NaN".to_string()).is_numeric_like());
    }

    #[test]
    fn test_numeric_like_text() {
        assert!(CellValue::Text("3.14".to_string()).is_numeric_like());
        assert!(!CellValue::Text("3.14abc".to_string()).is_numeric_like());
    }
}
