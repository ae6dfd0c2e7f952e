use serde::Deserialize;
use serde_json::Value;

/// Raw webhook envelope: a type tag plus an event-specific payload.
#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    data: Value,
}

/// One identity-provider lifecycle event, decoded once at the boundary.
/// Unrecognized types are preserved rather than rejected so new provider
/// events never break ingestion.
#[derive(Debug)]
pub enum IdentityEvent {
    UserCreated(UserEventData),
    UserUpdated(UserEventData),
    UserDeleted(DeletedUserData),
    Unknown { event_type: String, data: Value },
}

#[derive(Debug, Deserialize)]
pub struct UserEventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub primary_email_address_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailAddress {
    pub id: String,
    pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletedUserData {
    pub id: String,
}

impl IdentityEvent {
    /// Decode a verified webhook body. Malformed payloads for known event
    /// types are an error; unknown types always decode successfully.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: EventEnvelope = serde_json::from_slice(body)?;
        Ok(match envelope.event_type.as_str() {
            "user.created" => Self::UserCreated(serde_json::from_value(envelope.data)?),
            "user.updated" => Self::UserUpdated(serde_json::from_value(envelope.data)?),
            "user.deleted" => Self::UserDeleted(serde_json::from_value(envelope.data)?),
            _ => Self::Unknown {
                event_type: envelope.event_type,
                data: envelope.data,
            },
        })
    }
}

impl UserEventData {
    /// Resolve the primary email: the address whose id matches
    /// `primary_email_address_id`, falling back to the first listed one.
    pub fn primary_email(&self) -> Option<&str> {
        let by_id = self.primary_email_address_id.as_ref().and_then(|primary| {
            self.email_addresses
                .iter()
                .find(|email| &email.id == primary)
        });
        by_id
            .or_else(|| self.email_addresses.first())
            .map(|email| email.email_address.as_str())
    }
}
