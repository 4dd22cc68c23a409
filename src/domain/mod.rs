pub mod csv;
pub mod csv_file;
pub mod error;
pub mod plot;
pub mod user;
