//! Identity-provider integration: signed webhook verification, event
//! decoding, and reconciliation of local user rows.

pub mod event;
pub mod ingest;
pub mod signature;

pub use event::IdentityEvent;
pub use ingest::IdentityIngestor;
pub use signature::{SignatureError, WebhookVerifier};
