//! Domain logic for the JSON Share service: document lifecycle and
//! ownership, user reconciliation, and identity-provider webhook handling.
//!
//! Everything store-facing takes a `sqlx::PgPool` at construction; nothing
//! in this crate holds global state or knows about HTTP.

pub mod document;
pub mod error;
pub mod identity;
pub mod user;

pub use error::{DomainError, FieldError, ValidationErrors};
