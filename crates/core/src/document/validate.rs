//! Write-path validation for document payloads.
//!
//! Both create and update run the same per-field rules; update only checks
//! the fields the caller actually supplied.

use serde::Deserialize;

use crate::error::{DomainError, ValidationErrors};

pub const TITLE_MAX_CHARS: usize = 100;

/// Payload for creating a document. Both fields required.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
}

/// Partial payload for updating a document. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DocumentDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::default();
        check_title(&self.title, &mut errors);
        check_content(&self.content, &mut errors);
        errors.into_result()
    }
}

impl DocumentPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::default();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(content) = &self.content {
            check_content(content, &mut errors);
        }
        errors.into_result()
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if title.is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push("title", "Title must be less than 100 characters");
    }
}

fn check_content(content: &str, errors: &mut ValidationErrors) {
    if content.is_empty() {
        errors.push("content", "Content is required");
    } else if serde_json::from_str::<serde::de::IgnoredAny>(content).is_err() {
        errors.push("content", "Content must be valid JSON");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> DocumentDraft {
        DocumentDraft {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft("notes", r#"{"a": 1}"#).validate().is_ok());
    }

    #[test]
    fn scalar_json_content_is_valid() {
        assert!(draft("n", "5").validate().is_ok());
        assert!(draft("n", "null").validate().is_ok());
        assert!(draft("n", r#""text""#).validate().is_ok());
    }

    #[test]
    fn empty_title_fails() {
        let err = draft("", "{}").validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors[0].field, "title");
    }

    #[test]
    fn title_over_limit_fails_at_limit_passes() {
        assert!(draft(&"x".repeat(101), "{}").validate().is_err());
        assert!(draft(&"x".repeat(100), "{}").validate().is_ok());
    }

    #[test]
    fn malformed_json_content_fails() {
        let err = draft("notes", "{not json").validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors[0].field, "content");
    }

    #[test]
    fn both_fields_reported_together() {
        let err = draft("", "{broken").validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = DocumentPatch {
            title: None,
            content: Some("[1, 2]".to_string()),
        };
        assert!(patch.validate().is_ok());

        let patch = DocumentPatch {
            title: Some(String::new()),
            content: None,
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(DocumentPatch::default().validate().is_ok());
    }
}
