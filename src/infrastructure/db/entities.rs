use crate::domain::csv_file::{CsvFileSummary, SavedCsvFile};
use crate::domain::plot::PlotConfig;
use crate::domain::user::User;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub(super) struct UserEntity {
    id: String,
    auth_id: String,
    email: String,
    name: Option<String>,
    created_at: String,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            auth_id: entity.auth_id,
            email: entity.email,
            name: entity.name,
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct CsvFileEntity {
    id: String,
    user_id: String,
    filename: String,
    original_name: String,
    file_content: String,
    file_size: i64,
    columns: String,
    total_rows: i64,
    description: Option<String>,
    x_column: Option<String>,
    y_column: Option<String>,
    max_rows: Option<i64>,
    x_range_min: Option<f64>,
    x_range_max: Option<f64>,
    y_range_min: Option<f64>,
    y_range_max: Option<f64>,
    created_at: String,
    updated_at: String,
}

impl From<CsvFileEntity> for SavedCsvFile {
    fn from(entity: CsvFileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            filename: entity.filename,
            original_name: entity.original_name,
            file_content: entity.file_content,
            file_size: entity.file_size,
            columns: parse_columns(&entity.columns),
            total_rows: entity.total_rows,
            description: entity.description,
            config: PlotConfig {
                x_column: entity.x_column,
                y_column: entity.y_column,
                max_rows: entity.max_rows,
                x_range_min: entity.x_range_min,
                x_range_max: entity.x_range_max,
                y_range_min: entity.y_range_min,
                y_range_max: entity.y_range_max,
            },
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct CsvFileSummaryEntity {
    id: String,
    original_name: String,
    file_size: i64,
    columns: String,
    total_rows: i64,
    description: Option<String>,
    x_column: Option<String>,
    y_column: Option<String>,
    max_rows: Option<i64>,
    x_range_min: Option<f64>,
    x_range_max: Option<f64>,
    y_range_min: Option<f64>,
    y_range_max: Option<f64>,
    created_at: String,
    updated_at: String,
}

impl From<CsvFileSummaryEntity> for CsvFileSummary {
    fn from(entity: CsvFileSummaryEntity) -> Self {
        Self {
            id: entity.id,
            original_name: entity.original_name,
            file_size: entity.file_size,
            columns: parse_columns(&entity.columns),
            total_rows: entity.total_rows,
            description: entity.description,
            config: PlotConfig {
                x_column: entity.x_column,
                y_column: entity.y_column,
                max_rows: entity.max_rows,
                x_range_min: entity.x_range_min,
                x_range_max: entity.x_range_max,
                y_range_min: entity.y_range_min,
                y_range_max: entity.y_range_max,
            },
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

// Columns are stored as a JSON array in a TEXT column
fn parse_columns(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
