use crate::domain::csv_file::{CsvFileSummary, NewCsvFile, SavedCsvFile};
use crate::domain::error::{AppError, Result};
use crate::domain::plot::PlotConfig;

use super::entities::{CsvFileEntity, CsvFileSummaryEntity};
use super::DbPool;

const FULL_COLUMNS: &str = "id, user_id, filename, original_name, file_content, file_size, \
     columns, total_rows, description, x_column, y_column, max_rows, \
     x_range_min, x_range_max, y_range_min, y_range_max, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, original_name, file_size, columns, total_rows, description, \
     x_column, y_column, max_rows, x_range_min, x_range_max, y_range_min, y_range_max, \
     created_at, updated_at";

#[derive(Clone)]
pub struct CsvFileRepository {
    pool: DbPool,
}

impl CsvFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn save(&self, new: &NewCsvFile) -> Result<SavedCsvFile> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let columns = serde_json::to_string(&new.columns)
            .map_err(|e| AppError::Internal(format!("Failed to encode columns: {}", e)))?;

        sqlx::query(
            "INSERT INTO csv_files (id, user_id, filename, original_name, file_content, \
             file_size, columns, total_rows, description, x_column, y_column, max_rows, \
             x_range_min, x_range_max, y_range_min, y_range_max, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.user_id)
        .bind(&new.filename)
        .bind(&new.original_name)
        .bind(&new.file_content)
        .bind(new.file_size)
        .bind(&columns)
        .bind(new.total_rows)
        .bind(&new.description)
        .bind(&new.config.x_column)
        .bind(&new.config.y_column)
        .bind(new.config.max_rows)
        .bind(new.config.x_range_min)
        .bind(new.config.x_range_max)
        .bind(new.config.y_range_min)
        .bind(new.config.y_range_max)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to save CSV file: {}", e)))?;

        let entity = sqlx::query_as::<_, CsvFileEntity>(&format!(
            "SELECT {} FROM csv_files WHERE id = ?",
            FULL_COLUMNS
        ))
        .bind(&id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch saved CSV file: {}", e)))?;

        Ok(entity.into())
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<CsvFileSummary>> {
        let entities = sqlx::query_as::<_, CsvFileSummaryEntity>(&format!(
            "SELECT {} FROM csv_files WHERE user_id = ? ORDER BY created_at DESC",
            SUMMARY_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list CSV files: {}", e)))?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    pub async fn find(&self, id: &str, user_id: &str) -> Result<Option<SavedCsvFile>> {
        let entity = sqlx::query_as::<_, CsvFileEntity>(&format!(
            "SELECT {} FROM csv_files WHERE id = ? AND user_id = ?",
            FULL_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch CSV file: {}", e)))?;

        Ok(entity.map(Into::into))
    }

    /// Partial configuration update. Unset fields keep their stored
    /// values; an entirely empty update touches nothing and returns
    /// `false`. Returns whether a row was updated.
    pub async fn update_configuration(
        &self,
        id: &str,
        user_id: &str,
        config: &PlotConfig,
    ) -> Result<bool> {
        if config.is_empty() {
            return Ok(false);
        }

        let result = sqlx::query(
            "UPDATE csv_files SET \
             x_column = COALESCE(?, x_column), \
             y_column = COALESCE(?, y_column), \
             max_rows = COALESCE(?, max_rows), \
             x_range_min = COALESCE(?, x_range_min), \
             x_range_max = COALESCE(?, x_range_max), \
             y_range_min = COALESCE(?, y_range_min), \
             y_range_max = COALESCE(?, y_range_max), \
             updated_at = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&config.x_column)
        .bind(&config.y_column)
        .bind(config.max_rows)
        .bind(config.x_range_min)
        .bind(config.x_range_max)
        .bind(config.y_range_min)
        .bind(config.y_range_max)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update configuration: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a saved file, scoped to its owner. Returns whether a row
    /// was removed.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM csv_files WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete CSV file: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
