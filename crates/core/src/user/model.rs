use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user known to this service. The id comes from the identity provider
/// and is never generated locally; email arrives only via webhook.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
