// ============================================================
// INGESTION CONFIGURATION
// ============================================================
// Limits and thresholds for the CSV ingestion pipeline

use serde::{Deserialize, Serialize};

/// Configuration for CSV ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum accepted upload size in bytes (default: 50 MiB)
    pub max_file_bytes: u64,

    /// Number of leading non-missing values sampled per column when
    /// deciding whether it is numeric (default: 10)
    pub numeric_sample_size: usize,

    /// Minimum fraction of the sample that must parse as numeric for a
    /// column to classify as numeric (default: 0.7)
    pub numeric_threshold: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 50 * 1024 * 1024,
            numeric_sample_size: 10,
            numeric_threshold: 0.7,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_bytes == 0 {
            return Err("max_file_bytes must be > 0".to_string());
        }
        if self.numeric_sample_size == 0 {
            return Err("numeric_sample_size must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.numeric_threshold) {
            return Err("numeric_threshold must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}
