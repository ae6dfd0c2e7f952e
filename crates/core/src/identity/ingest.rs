use crate::error::DomainError;
use crate::identity::event::IdentityEvent;
use crate::user::UserStore;

/// Applies verified identity events to the local `users` table. Not the
/// source of truth for user existence (the document create path also
/// materializes rows), only for email synchronization and deletion.
#[derive(Debug, Clone)]
pub struct IdentityIngestor {
    users: UserStore,
}

impl IdentityIngestor {
    pub fn new(users: UserStore) -> Self {
        Self { users }
    }

    /// Apply one event. Unknown event types are acknowledged and ignored so
    /// the provider can add kinds without breaking this endpoint.
    pub async fn apply(&self, event: IdentityEvent) -> Result<(), DomainError> {
        match event {
            IdentityEvent::UserCreated(data) | IdentityEvent::UserUpdated(data) => {
                self.users.upsert_email(&data.id, data.primary_email()).await?;
                tracing::info!(user_id = %data.id, "user reconciled from webhook");
            }
            IdentityEvent::UserDeleted(data) => {
                self.users.delete(&data.id).await?;
                tracing::info!(user_id = %data.id, "user deleted, documents cascaded");
            }
            IdentityEvent::Unknown { event_type, .. } => {
                tracing::debug!(event_type = %event_type, "ignoring unrecognized webhook event");
            }
        }
        Ok(())
    }
}
