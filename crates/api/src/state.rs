use std::sync::Arc;

use json_share_core::document::DocumentService;
use json_share_core::identity::{IdentityIngestor, WebhookVerifier};
use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap. Services are built once
/// at startup and injected here; no module holds a global store handle.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    config: AppConfig,
    documents: DocumentService,
    ingestor: IdentityIngestor,
    verifier: WebhookVerifier,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: AppConfig,
        documents: DocumentService,
        ingestor: IdentityIngestor,
        verifier: WebhookVerifier,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                pool,
                config,
                documents,
                ingestor,
                verifier,
            }),
        }
    }

    /// Raw pool access, used only by the health probe.
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn documents(&self) -> &DocumentService {
        &self.inner.documents
    }

    pub fn ingestor(&self) -> &IdentityIngestor {
        &self.inner.ingestor
    }

    pub fn verifier(&self) -> &WebhookVerifier {
        &self.inner.verifier
    }
}
