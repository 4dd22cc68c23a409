// ============================================================
// SQLITE PERSISTENCE
// ============================================================

pub mod connection;
pub mod csv_files;
mod entities;
pub mod users;

pub use connection::{init_db, DbPool};
pub use csv_files::CsvFileRepository;
pub use users::UserRepository;
