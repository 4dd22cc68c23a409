pub mod filter;
pub mod ingest;

pub use filter::{filter_points, PlotPoint};
pub use ingest::{IngestFailure, IngestOutput, IngestUseCase};
