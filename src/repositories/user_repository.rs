use crate::models::User;
use sqlx::{PgPool, Result as SqlxResult};

/// Repository for user data access
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user (seeding only; accounts belong to the auth backend)
    pub async fn create(&self, username: &str, email: &str) -> SqlxResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id, username, first_name, last_name, email, avatar_path, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }

    /// Find every user
    pub async fn find_all(&self) -> SqlxResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, first_name, last_name, email, avatar_path, created_at
            FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
