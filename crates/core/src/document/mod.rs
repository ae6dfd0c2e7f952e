pub mod model;
pub mod service;
pub mod slug;
pub mod validate;

pub use model::JsonDocument;
pub use service::DocumentService;
pub use validate::{DocumentDraft, DocumentPatch};
