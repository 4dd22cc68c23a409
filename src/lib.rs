// ============================================================
// CSVPLOT
// ============================================================
// CSV upload, ingestion and scatter-plot configuration service.
//
// Layering:
//   domain         - value objects and errors, no I/O
//   application    - use cases (ingestion driver, plot filtering)
//   infrastructure - parsers, database repositories, config, sessions
//   interfaces     - HTTP surface (actix-web)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
