use super::{AppState, SESSION_COOKIE};
use crate::domain::error::Result;
use crate::domain::user::AuthUser;
use crate::infrastructure::session::SessionProvider;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Scope};
use serde_json::json;

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(status)
        .service(create_session)
        .service(logout)
}

/// Session probe for the frontend: never fails, reports whether the
/// cookie maps to a live session.
#[get("/status")]
async fn status(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let user = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => state.sessions.authenticate(cookie.value()).await,
        None => None,
    };

    match user {
        Some(user) => HttpResponse::Ok().json(json!({ "authenticated": true, "user": user })),
        None => HttpResponse::Ok().json(json!({ "authenticated": false })),
    }
}

/// Exchange a provider-asserted identity for a session cookie. The
/// redirect dance with the identity provider happens outside this
/// service.
#[post("/session")]
async fn create_session(
    state: web::Data<AppState>,
    payload: web::Json<AuthUser>,
) -> Result<HttpResponse> {
    let auth = payload.into_inner();
    let user = state.users.get_or_create(&auth).await?;
    let token = state.sessions.issue(auth);

    tracing::info!(user_id = %user.id, "session issued");

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true, "user": user })))
}

#[post("/logout")]
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value());
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "success": true, "message": "Logged out" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::IngestUseCase;
    use crate::infrastructure::db::connection::memory_pool;
    use crate::infrastructure::db::{CsvFileRepository, UserRepository};
    use crate::infrastructure::session::InMemorySessionStore;
    use actix_web::{test, App};
    use std::sync::Arc;

    async fn test_state() -> AppState {
        let pool = memory_pool().await;
        AppState {
            users: UserRepository::new(pool.clone()),
            csv_files: CsvFileRepository::new(pool),
            sessions: Arc::new(InMemorySessionStore::new()),
            ingest: IngestUseCase::default(),
        }
    }

    fn auth_user() -> AuthUser {
        AuthUser {
            sub: "sub-1".to_string(),
            email: "a@example.com".to_string(),
            name: Some("Alice".to_string()),
            picture: None,
        }
    }

    #[actix_web::test]
    async fn test_status_without_cookie_is_anonymous() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().await))
                .service(scope()),
        )
        .await;

        let req = test::TestRequest::get().uri("/auth/status").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], false);
    }

    #[actix_web::test]
    async fn test_session_then_status_round_trip() {
        let state = test_state().await;
        let sessions = state.sessions.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/session")
            .set_json(auth_user())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "a@example.com");

        // A token issued by the store authenticates the status probe
        let token = sessions.issue(auth_user());
        let req = test::TestRequest::get()
            .uri("/auth/status")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["sub"], "sub-1");
    }

    #[actix_web::test]
    async fn test_logout_revokes_the_session() {
        let state = test_state().await;
        let sessions = state.sessions.clone();
        let token = sessions.issue(auth_user());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/logout")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get()
            .uri("/auth/status")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], false);
    }
}
