use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-owned JSON document.
/// Maps to the `json_documents` PostgreSQL table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JsonDocument {
    pub id: Uuid,
    pub title: String,
    /// Raw JSON text. Validated as syntactically valid JSON on every write;
    /// the store keeps it as opaque text.
    pub content: String,
    /// Immutable public share token. Grants unauthenticated read access and
    /// nothing else; never regenerated, never derived from title or content.
    pub slug: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
