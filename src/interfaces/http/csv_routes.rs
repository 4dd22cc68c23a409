use super::{require_user, AppState};
use crate::application::filter_points;
use crate::application::ingest::TracingProgress;
use crate::domain::csv::CancelToken;
use crate::domain::csv_file::NewCsvFile;
use crate::domain::error::{AppError, Result};
use crate::domain::plot::PlotConfig;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, ResponseError, Scope};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

pub fn scope() -> Scope {
    web::scope("/csv")
        .service(ingest)
        .service(save_csv)
        .service(list_files)
        .service(plot_data)
        .service(get_file)
        .service(update_configuration)
        .service(delete_file)
}

#[derive(Debug, MultipartForm)]
struct IngestForm {
    file: TempFile,
}

#[derive(Debug, MultipartForm)]
struct SaveCsvForm {
    file: TempFile,
    description: Option<Text<String>>,
    x_column: Option<Text<String>>,
    y_column: Option<Text<String>>,
    max_rows: Option<Text<i64>>,
    x_range_min: Option<Text<f64>>,
    x_range_max: Option<Text<f64>>,
    y_range_min: Option<Text<f64>>,
    y_range_max: Option<Text<f64>>,
}

#[derive(Debug, Deserialize, Validate)]
struct ConfigurationForm {
    x_column: Option<String>,
    y_column: Option<String>,
    #[validate(range(min = 1))]
    max_rows: Option<i64>,
    x_range_min: Option<f64>,
    x_range_max: Option<f64>,
    y_range_min: Option<f64>,
    y_range_max: Option<f64>,
}

impl ConfigurationForm {
    fn into_config(self) -> PlotConfig {
        PlotConfig {
            x_column: self.x_column,
            y_column: self.y_column,
            max_rows: self.max_rows,
            x_range_min: self.x_range_min,
            x_range_max: self.x_range_max,
            y_range_min: self.y_range_min,
            y_range_max: self.y_range_max,
        }
    }
}

/// Run the full parse pipeline on an uploaded file. Succeeds with the
/// classified columns and ranges, or fails with a message plus the
/// ordered attempt log.
#[post("/ingest")]
async fn ingest(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: MultipartForm<IngestForm>,
) -> Result<HttpResponse> {
    require_user(&state, &req).await?;

    let form = form.into_inner();
    let name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload.csv".to_string());
    let path = form.file.file.path().to_path_buf();
    let pipeline = state.ingest.clone();

    tracing::info!(file = %name, "ingesting upload");

    let outcome = web::block(move || {
        let bytes = std::fs::read(&path)?;
        Ok::<_, AppError>(pipeline.run(&name, &bytes, &TracingProgress, &CancelToken::new()))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))??;

    match outcome {
        Ok(out) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "columns": out.dataset.columns,
            "numericColumns": out.numeric_columns,
            "ranges": out.ranges,
            "rowCount": out.dataset.row_count(),
            "strategy": out.strategy,
            "attempts": out.attempts,
        }))),
        Err(failure) => {
            tracing::warn!(error = %failure.error, "ingestion failed");
            Ok(HttpResponse::build(failure.error.status_code()).json(json!({
                "success": false,
                "message": failure.error.to_string(),
                "attempts": failure.attempts,
            })))
        }
    }
}

/// Persist an upload together with an optional plot configuration.
/// Headers are taken from a plain comma split of the first line; the
/// full parse cascade runs later, when the file is loaded for plotting.
#[post("/save-csv")]
async fn save_csv(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: MultipartForm<SaveCsvForm>,
) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;

    let form = form.into_inner();
    let original_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload.csv".to_string());

    if !original_name.to_lowercase().ends_with(".csv") {
        return Err(AppError::ValidationError(
            "Only .csv files are supported".to_string(),
        ));
    }

    let path = form.file.file.path().to_path_buf();
    let bytes = web::block(move || std::fs::read(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))??;

    let content = String::from_utf8_lossy(&bytes).into_owned();
    let columns = parse_header_columns(&content)?;
    let total_rows = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1) as i64;

    let config = PlotConfig {
        x_column: form.x_column.map(Text::into_inner),
        y_column: form.y_column.map(Text::into_inner),
        max_rows: form.max_rows.map(Text::into_inner),
        x_range_min: form.x_range_min.map(Text::into_inner),
        x_range_max: form.x_range_max.map(Text::into_inner),
        y_range_min: form.y_range_min.map(Text::into_inner),
        y_range_max: form.y_range_max.map(Text::into_inner),
    };
    ensure_ordered_ranges(&config)?;

    let new = NewCsvFile {
        user_id: user.id,
        filename: format!("{}_{}", uuid::Uuid::new_v4(), original_name),
        original_name,
        file_size: bytes.len() as i64,
        file_content: content,
        columns,
        total_rows,
        description: form.description.map(Text::into_inner),
        config,
    };

    let saved = state.csv_files.save(&new).await?;
    tracing::info!(file_id = %saved.id, "saved CSV file");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "CSV file saved successfully",
        "file_id": saved.id,
        "filename": saved.filename,
    })))
}

#[get("/csv-files")]
async fn list_files(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;
    let files = state.csv_files.list_for_user(&user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "files": files })))
}

#[get("/csv-file/{id}")]
async fn get_file(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;
    let file = state
        .csv_files
        .find(&path, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("CSV file not found".to_string()))?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "file": file })))
}

/// Re-ingest a saved file and apply its stored configuration, yielding
/// the point set for the scatter plot.
#[get("/csv-file/{id}/plot-data")]
async fn plot_data(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;
    let file = state
        .csv_files
        .find(&path, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("CSV file not found".to_string()))?;

    let pipeline = state.ingest.clone();
    let name = file.original_name.clone();
    let content = file.file_content.clone();

    let outcome = web::block(move || {
        pipeline.run(
            &name,
            content.as_bytes(),
            &TracingProgress,
            &CancelToken::new(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?;

    let out = outcome.map_err(|failure| failure.error)?;
    let points = filter_points(&out.dataset, &file.config)?;
    let count = points.len();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "points": points,
        "count": count,
    })))
}

#[put("/csv-file/{id}/configuration")]
async fn update_configuration(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<ConfigurationForm>,
) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;

    let form = form.into_inner();
    form.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let config = form.into_config();
    ensure_ordered_ranges(&config)?;
    if config.is_empty() {
        return Err(AppError::ValidationError(
            "No configuration fields provided".to_string(),
        ));
    }

    let updated = state
        .csv_files
        .update_configuration(&path, &user.id, &config)
        .await?;
    if !updated {
        return Err(AppError::NotFound("CSV file not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Configuration updated" })))
}

#[delete("/csv-file/{id}")]
async fn delete_file(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = require_user(&state, &req).await?;
    let deleted = state.csv_files.delete(&path, &user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("CSV file not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "CSV file deleted" })))
}

// Save-time header view: plain comma split, trimmed, quotes stripped.
fn parse_header_columns(content: &str) -> Result<Vec<String>> {
    let header = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("Empty CSV file".to_string()))?;

    Ok(header
        .split(',')
        .map(|field| field.trim().trim_matches('"').to_string())
        .collect())
}

fn ensure_ordered_ranges(config: &PlotConfig) -> Result<()> {
    for (axis, range) in [("x", config.x_range()), ("y", config.y_range())] {
        if let Some((min, max)) = range {
            if min > max {
                return Err(AppError::ValidationError(format!(
                    "{axis}_range_min must not exceed {axis}_range_max"
                )));
            }
        }
    }
    Ok(())
}
