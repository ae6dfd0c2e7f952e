use sqlx::PgPool;
use uuid::Uuid;

use crate::document::model::JsonDocument;
use crate::document::slug;
use crate::document::validate::{DocumentDraft, DocumentPatch};
use crate::error::DomainError;
use crate::user::UserStore;

const DOCUMENT_COLUMNS: &str = "id, title, content, slug, user_id, created_at, updated_at";

/// How many fresh slugs to try before giving up on a unique-violation.
/// With a 64^10 slug space a single collision is already extraordinary.
const SLUG_RETRY_LIMIT: usize = 3;

/// Sole arbiter of document reads and writes. Every authenticated operation
/// folds the ownership check into the statement itself (`WHERE id AND
/// user_id`), so ownership mismatch and true absence are indistinguishable
/// and there is no check-then-act window.
#[derive(Debug, Clone)]
pub struct DocumentService {
    pool: PgPool,
    users: UserStore,
}

impl DocumentService {
    pub fn new(pool: PgPool, users: UserStore) -> Self {
        Self { pool, users }
    }

    /// All documents owned by `owner_id`, most recently updated first.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<JsonDocument>, DomainError> {
        let docs = sqlx::query_as::<_, JsonDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM json_documents \
             WHERE user_id = $1 ORDER BY updated_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    /// Validate, lazily materialize the owner's user row, and insert with a
    /// fresh slug. A unique-violation on the slug constraint retries with a
    /// new slug a few times; any other unique-violation is a `Conflict`.
    pub async fn create(
        &self,
        owner_id: &str,
        draft: DocumentDraft,
    ) -> Result<JsonDocument, DomainError> {
        draft.validate()?;
        self.users.ensure_exists(owner_id).await?;

        for attempt in 0..SLUG_RETRY_LIMIT {
            let slug = slug::generate();
            let inserted = sqlx::query_as::<_, JsonDocument>(&format!(
                "INSERT INTO json_documents (title, content, slug, user_id) \
                 VALUES ($1, $2, $3, $4) RETURNING {DOCUMENT_COLUMNS}"
            ))
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&slug)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await;

            match inserted {
                Ok(doc) => {
                    tracing::info!(document_id = %doc.id, user_id = owner_id, "document created");
                    return Ok(doc);
                }
                Err(err) if is_slug_collision(&err) => {
                    tracing::warn!(attempt, "slug collision, regenerating");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(DomainError::Conflict(
            "could not allocate a unique slug".to_string(),
        ))
    }

    /// Fetch one document by id, visible only to its owner.
    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<JsonDocument, DomainError> {
        sqlx::query_as::<_, JsonDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM json_documents WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DomainError::NotFound)
    }

    /// Apply a partial update as one conditional statement. Zero rows means
    /// the document does not exist for this owner, whether it never did,
    /// belongs to someone else, or vanished concurrently.
    pub async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        patch: DocumentPatch,
    ) -> Result<JsonDocument, DomainError> {
        patch.validate()?;

        sqlx::query_as::<_, JsonDocument>(&format!(
            "UPDATE json_documents \
             SET title = COALESCE($3, title), content = COALESCE($4, content), updated_at = now() \
             WHERE id = $1 AND user_id = $2 RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(patch.title.as_deref())
        .bind(patch.content.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DomainError::NotFound)
    }

    /// Conditional delete; repeated deletes of the same id surface the same
    /// `NotFound` the second time.
    pub async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM json_documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        tracing::info!(document_id = %id, user_id = owner_id, "document deleted");
        Ok(())
    }

    /// The one unauthenticated read path: fetch by share slug, no ownership
    /// check by design.
    pub async fn get_public(&self, slug: &str) -> Result<JsonDocument, DomainError> {
        sqlx::query_as::<_, JsonDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM json_documents WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DomainError::NotFound)
    }
}

/// True only for a unique-violation on the slug constraint; other unique
/// violations must not be retried.
fn is_slug_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some("json_documents_slug_key")
        }
        _ => false,
    }
}
