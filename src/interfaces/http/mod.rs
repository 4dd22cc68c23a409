// ============================================================
// HTTP INTERFACE
// ============================================================
// actix-web surface: /api/auth/* session endpoints and /api/csv/*
// ingestion + saved-file endpoints behind the session wall.

use crate::application::IngestUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::user::User;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::{CsvFileRepository, UserRepository};
use crate::infrastructure::session::{InMemorySessionStore, SessionProvider};
use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::{web, App, HttpRequest, HttpServer};
use std::sync::Arc;

pub mod auth_routes;
pub mod csv_routes;
mod error;

pub const SESSION_COOKIE: &str = "session_token";

// Uploads are rejected past 50 MiB inside the pipeline; the transport
// limit only needs headroom for the multipart framing.
const MULTIPART_TOTAL_LIMIT: usize = 64 * 1024 * 1024;

pub struct AppState {
    pub users: UserRepository,
    pub csv_files: CsvFileRepository,
    pub sessions: Arc<InMemorySessionStore>,
    pub ingest: IngestUseCase,
}

/// Resolve the session cookie to a persisted user, or fail with 401.
pub(crate) async fn require_user(state: &AppState, req: &HttpRequest) -> Result<User> {
    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Missing session".to_string()))?;

    let auth = state
        .sessions
        .authenticate(cookie.value())
        .await
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

    state.users.get_or_create(&auth).await
}

pub fn start_server(state: AppState, config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let frontend_origin = config.frontend_origin.clone();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(MultipartFormConfig::default().total_limit(MULTIPART_TOTAL_LIMIT))
            .service(
                web::scope("/api")
                    .service(auth_routes::scope())
                    .service(csv_routes::scope()),
            )
    })
    .bind(config.bind_addr())?
    .run();

    Ok(server)
}
