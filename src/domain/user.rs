use serde::{Deserialize, Serialize};

/// Identity asserted by the external login provider. The provider
/// itself (redirect dance, token exchange) lives outside this service;
/// we only consume the resulting profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable subject identifier from the identity provider.
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Application user as persisted in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub auth_id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
