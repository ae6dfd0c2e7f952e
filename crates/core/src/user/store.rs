use sqlx::PgPool;

use crate::error::DomainError;
use crate::user::User;

/// Store client for the `users` table. Two writers converge on these rows:
/// the document create path (lazy, id only) and the webhook ingestor
/// (id + email).
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently materialize a user row for `id`. Never touches the
    /// email of an existing row.
    pub async fn ensure_exists(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Upsert from a webhook event: create the row if absent, otherwise
    /// replace the stored email with the provider's current value.
    pub async fn upsert_email(&self, id: &str, email: Option<&str>) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO users (id, email) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, updated_at = now()",
        )
        .bind(id)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a user row. Owned documents go with it via `ON DELETE CASCADE`.
    /// Deleting an unknown id is a no-op, matching webhook retry semantics.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
