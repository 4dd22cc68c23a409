use crate::domain::error::{AppError, Result};
use crate::domain::user::{AuthUser, User};

use super::entities::UserEntity;
use super::DbPool;

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Look up the user by provider subject, creating the row on first
    /// login and refreshing email/name when the provider profile
    /// changed.
    pub async fn get_or_create(&self, auth: &AuthUser) -> Result<User> {
        let existing = sqlx::query_as::<_, UserEntity>(
            "SELECT id, auth_id, email, name, created_at FROM users WHERE auth_id = ?",
        )
        .bind(&auth.sub)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {}", e)))?;

        if let Some(entity) = existing {
            let user: User = entity.into();
            if user.email != auth.email || user.name != auth.name {
                sqlx::query("UPDATE users SET email = ?, name = ? WHERE auth_id = ?")
                    .bind(&auth.email)
                    .bind(&auth.name)
                    .bind(&auth.sub)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(format!("Failed to update user: {}", e))
                    })?;
                return Ok(User {
                    email: auth.email.clone(),
                    name: auth.name.clone(),
                    ..user
                });
            }
            return Ok(user);
        }

        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, auth_id, email, name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&auth.sub)
        .bind(&auth.email)
        .bind(&auth.name)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {}", e)))?;

        tracing::info!(auth_id = %auth.sub, "created user");

        let entity = sqlx::query_as::<_, UserEntity>(
            "SELECT id, auth_id, email, name, created_at FROM users WHERE id = ?",
        )
        .bind(&id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {}", e)))?;

        Ok(entity.into())
    }
}

#[cfg(test)]
mod tests {
    use super::super::connection::memory_pool;
    use super::*;

    fn auth_user() -> AuthUser {
        AuthUser {
            sub: "sub-1".to_string(),
            email: "a@example.com".to_string(),
            name: Some("Alice".to_string()),
            picture: None,
        }
    }

    #[actix_web::test]
    async fn test_first_login_creates_user() {
        let repo = UserRepository::new(memory_pool().await);
        let user = repo.get_or_create(&auth_user()).await.unwrap();
        assert_eq!(user.auth_id, "sub-1");
        assert_eq!(user.email, "a@example.com");
        assert!(user.created_at.is_some());
    }

    #[actix_web::test]
    async fn test_repeat_login_returns_same_row() {
        let repo = UserRepository::new(memory_pool().await);
        let first = repo.get_or_create(&auth_user()).await.unwrap();
        let second = repo.get_or_create(&auth_user()).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[actix_web::test]
    async fn test_profile_changes_are_refreshed() {
        let repo = UserRepository::new(memory_pool().await);
        let first = repo.get_or_create(&auth_user()).await.unwrap();

        let mut updated = auth_user();
        updated.email = "new@example.com".to_string();
        let second = repo.get_or_create(&updated).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.email, "new@example.com");
    }
}
