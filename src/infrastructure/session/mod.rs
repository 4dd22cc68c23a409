// ============================================================
// SESSION STORE
// ============================================================
// The login/signup redirect dance happens outside this service; here
// we only map opaque session tokens to the authenticated identity.

use crate::domain::user::AuthUser;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Seam for session validation, so the HTTP layer never cares where
/// tokens come from.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Option<AuthUser>;
}

/// Token store backed by a process-local map.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, AuthUser>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh opaque token for an authenticated identity.
    pub fn issue(&self, user: AuthUser) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.lock().unwrap().insert(token.clone(), user);
        token
    }

    pub fn revoke(&self, token: &str) {
        self.sessions.lock().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionStore {
    async fn authenticate(&self, token: &str) -> Option<AuthUser> {
        self.sessions.lock().unwrap().get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user() -> AuthUser {
        AuthUser {
            sub: "sub-1".to_string(),
            email: "a@example.com".to_string(),
            name: None,
            picture: None,
        }
    }

    #[actix_web::test]
    async fn test_issued_token_authenticates() {
        let store = InMemorySessionStore::new();
        let token = store.issue(auth_user());
        let user = store.authenticate(&token).await.unwrap();
        assert_eq!(user.sub, "sub-1");
    }

    #[actix_web::test]
    async fn test_unknown_token_is_rejected() {
        let store = InMemorySessionStore::new();
        assert!(store.authenticate("nope").await.is_none());
    }

    #[actix_web::test]
    async fn test_revoked_token_is_rejected() {
        let store = InMemorySessionStore::new();
        let token = store.issue(auth_user());
        store.revoke(&token);
        assert!(store.authenticate(&token).await.is_none());
    }
}
