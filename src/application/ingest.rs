// ============================================================
// INGESTION DRIVER
// ============================================================
// Sequences the parse strategies in strict fallback order:
// loader -> structured cascade -> manual recovery -> classifier.
// Stage-local failures advance the pipeline; only final failures
// surface, always together with the attempt log.

use crate::domain::csv::{
    CancelToken, ColumnRange, Dataset, IngestConfig, IngestStage, ParseAttempt, ProgressSink,
};
use crate::domain::error::AppError;
use crate::infrastructure::csv::{classifier, loader, manual, structured};
use std::collections::BTreeMap;

/// Successful ingestion: the coerced dataset, its numeric columns and
/// ranges, which strategy won, and the diagnostic trail.
#[derive(Debug, Clone)]
pub struct IngestOutput {
    pub dataset: Dataset,
    pub numeric_columns: Vec<String>,
    pub ranges: BTreeMap<String, ColumnRange>,
    pub strategy: String,
    pub attempts: Vec<ParseAttempt>,
}

/// Final ingestion failure with the full attempt log, so the caller can
/// always show a descriptive error plus diagnostics, never a blank
/// state.
#[derive(Debug, Clone)]
pub struct IngestFailure {
    pub error: AppError,
    pub attempts: Vec<ParseAttempt>,
}

/// Drives one upload through the full pipeline.
#[derive(Debug, Clone, Default)]
pub struct IngestUseCase {
    config: IngestConfig,
}

impl IngestUseCase {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn run(
        &self,
        file_name: &str,
        bytes: &[u8],
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<IngestOutput, IngestFailure> {
        let mut attempts = Vec::new();

        if cancel.is_canceled() {
            return Err(canceled(attempts));
        }

        let raw = match loader::load(file_name, bytes, self.config.max_file_bytes, progress) {
            Ok(raw) => raw,
            Err(error) => {
                attempts.push(ParseAttempt::new(IngestStage::Load, error.to_string()));
                return Err(IngestFailure { error, attempts });
            }
        };

        attempts.push(ParseAttempt::new(
            IngestStage::Load,
            format!(
                "File size: {} bytes, Content preview: {}...",
                raw.size,
                preview(&raw.content, 100)
            ),
        ));
        progress.progress(30);

        for (index, (delimiter, label)) in structured::DELIMITER_CANDIDATES.iter().enumerate() {
            if cancel.is_canceled() {
                return Err(canceled(attempts));
            }

            match structured::parse_with_delimiter(&raw.content, *delimiter) {
                Ok(dataset) => {
                    attempts.push(ParseAttempt::new(
                        IngestStage::Structured,
                        format!("{} successful with {} rows", label, dataset.row_count()),
                    ));
                    return self.finish(dataset, label, attempts, progress);
                }
                Err(error) => {
                    attempts.push(ParseAttempt::new(
                        IngestStage::Structured,
                        format!("{} parsing failed: {}", label, error),
                    ));
                    progress.progress(30 + 20 * (index as u8 + 1));
                }
            }
        }

        if cancel.is_canceled() {
            return Err(canceled(attempts));
        }

        match manual::parse(&raw.content) {
            Ok(dataset) => {
                attempts.push(ParseAttempt::new(
                    IngestStage::Manual,
                    format!(
                        "Manual parsing successful. Headers: {}",
                        dataset.columns.join(", ")
                    ),
                ));
                self.finish(dataset, "Manual parsing", attempts, progress)
            }
            Err(error) => {
                attempts.push(ParseAttempt::new(IngestStage::Manual, error.to_string()));
                let error = AppError::RecoveryError(format!(
                    "All parsing methods failed. File content preview: {}...",
                    preview(&raw.content, 200)
                ));
                Err(IngestFailure { error, attempts })
            }
        }
    }

    fn finish(
        &self,
        dataset: Dataset,
        strategy: &str,
        mut attempts: Vec<ParseAttempt>,
        progress: &dyn ProgressSink,
    ) -> Result<IngestOutput, IngestFailure> {
        progress.progress(95);

        match classifier::classify(dataset, &self.config) {
            Ok(classified) => {
                attempts.push(ParseAttempt::new(
                    IngestStage::Classify,
                    format!(
                        "{} successful: {} rows, {} numeric columns",
                        strategy,
                        classified.dataset.row_count(),
                        classified.numeric_columns.len()
                    ),
                ));
                progress.progress(100);
                Ok(IngestOutput {
                    dataset: classified.dataset,
                    numeric_columns: classified.numeric_columns,
                    ranges: classified.ranges,
                    strategy: strategy.to_string(),
                    attempts,
                })
            }
            Err(error) => {
                attempts.push(ParseAttempt::new(IngestStage::Classify, error.to_string()));
                Err(IngestFailure { error, attempts })
            }
        }
    }
}

fn canceled(attempts: Vec<ParseAttempt>) -> IngestFailure {
    IngestFailure {
        error: AppError::Canceled,
        attempts,
    }
}

// Char-boundary-safe prefix for diagnostics
fn preview(content: &str, limit: usize) -> String {
    content.chars().take(limit).collect()
}

/// Sink that forwards progress checkpoints to the tracing subscriber.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn progress(&self, percent: u8) {
        tracing::debug!(percent, "ingest progress");
    }
}
