use csvplot::application::IngestUseCase;
use csvplot::infrastructure::config::AppConfig;
use csvplot::infrastructure::db::{init_db, CsvFileRepository, UserRepository};
use csvplot::infrastructure::session::InMemorySessionStore;
use csvplot::interfaces::http::{start_server, AppState};
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load().map_err(io::Error::other)?;
    tracing::info!(host = %config.host, port = config.port, "starting csvplot");

    let pool = init_db(&config.database_url).await.map_err(io::Error::other)?;

    let state = AppState {
        users: UserRepository::new(pool.clone()),
        csv_files: CsvFileRepository::new(pool),
        sessions: Arc::new(InMemorySessionStore::new()),
        ingest: IngestUseCase::default(),
    };

    start_server(state, &config)?.await
}
