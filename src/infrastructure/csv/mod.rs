// ============================================================
// CSV INFRASTRUCTURE
// ============================================================
// Parse strategies and column classification for the ingestion
// pipeline. Each strategy is a pure function over the decoded text;
// the driver in application::ingest sequences them.

pub mod classifier;
pub mod loader;
pub mod manual;
pub mod structured;
