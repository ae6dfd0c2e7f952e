use serde::Serialize;
use thiserror::Error;

/// A single failed field from payload validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field failures from one validation pass, reported together so the
/// caller sees every problem at once rather than one per round trip.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok if no field failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

/// Domain error taxonomy. Ownership mismatch and true absence both surface
/// as `NotFound`; callers must not be able to tell them apart.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DomainError {
    /// Classify store-transport errors structurally: unique-constraint
    /// violations become `Conflict`, pool/connection failures become
    /// `Unavailable`, anything else stays opaque.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return DomainError::NotFound;
        }
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return DomainError::Conflict(db.message().to_string());
            }
        }
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DomainError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(_) => DomainError::Unavailable(err.to_string()),
            other => DomainError::Store(other),
        }
    }
}
