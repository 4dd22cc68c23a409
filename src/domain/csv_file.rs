use super::plot::PlotConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted CSV file with its plot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCsvFile {
    pub id: String,
    pub user_id: String,
    /// Stored filename, unique per save: `{uuid}_{original_name}`.
    pub filename: String,
    pub original_name: String,
    pub file_content: String,
    pub file_size: i64,
    /// Header columns as parsed at save time.
    pub columns: Vec<String>,
    pub total_rows: i64,
    pub description: Option<String>,
    pub config: PlotConfig,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Listing view of a saved file, without the raw content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvFileSummary {
    pub id: String,
    pub original_name: String,
    pub file_size: i64,
    pub columns: Vec<String>,
    pub total_rows: i64,
    pub description: Option<String>,
    pub config: PlotConfig,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields required to insert a new saved file.
#[derive(Debug, Clone)]
pub struct NewCsvFile {
    pub user_id: String,
    pub filename: String,
    pub original_name: String,
    pub file_content: String,
    pub file_size: i64,
    pub columns: Vec<String>,
    pub total_rows: i64,
    pub description: Option<String>,
    pub config: PlotConfig,
}
