pub mod documents;
pub mod health;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(documents::routes())
        .merge(webhooks::routes())
        .with_state(state)
}

#[cfg(test)]
pub mod test_support {
    //! State construction for handler tests. The pool is connected lazily
    //! and never resolves, which is fine: these tests only cover behavior
    //! that happens before any store access.

    use json_share_core::document::DocumentService;
    use json_share_core::identity::{IdentityIngestor, WebhookVerifier};
    use json_share_core::user::UserStore;
    use sqlx::postgres::PgPoolOptions;

    use crate::config::AppConfig;
    use crate::state::AppState;

    pub const JWT_SECRET: &str = "test-jwt-secret";
    // "test-signing-key", base64-encoded.
    pub const WEBHOOK_SECRET: &str = "whsec_dGVzdC1zaWduaW5nLWtleQ==";

    pub fn test_verifier() -> WebhookVerifier {
        WebhookVerifier::new(WEBHOOK_SECRET).expect("valid test secret")
    }

    pub fn test_state() -> AppState {
        let database_url = "postgres://localhost:1/unreachable";
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_url)
            .expect("parse lazy pool url");

        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: database_url.to_string(),
            db_max_connections: 1,
            db_min_connections: 0,
            jwt_secret: JWT_SECRET.to_string(),
            webhook_signing_secret: WEBHOOK_SECRET.to_string(),
            log_level: "debug".to_string(),
        };

        let users = UserStore::new(pool.clone());
        let documents = DocumentService::new(pool.clone(), users.clone());
        let ingestor = IdentityIngestor::new(users);
        let verifier = test_verifier();
        AppState::new(pool, config, documents, ingestor, verifier)
    }
}
