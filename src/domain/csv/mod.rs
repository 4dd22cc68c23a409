// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV ingestion
// No I/O, no async, no external dependencies beyond serde

mod cell_value;
mod dataset;
mod diagnostics;
mod ingest_config;

pub use cell_value::CellValue;
pub use dataset::{ColumnRange, Dataset, RawFile};
pub use diagnostics::{CancelToken, IngestStage, NoProgress, ParseAttempt, ProgressSink};
pub use ingest_config::IngestConfig;
