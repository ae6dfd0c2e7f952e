use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Full health check — probes database connectivity with a timeout and
/// reports per-check results. 503 when anything fails, so load balancers
/// and deploy validation can gate on this endpoint.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_ok = tokio::time::timeout(
        DB_PROBE_TIMEOUT,
        sqlx::query("SELECT 1").execute(state.pool()),
    )
    .await
    .map(|result| result.is_ok())
    .unwrap_or(false);

    if !database_ok {
        tracing::warn!("health check failed: database unreachable");
    }

    let healthy = database_ok;
    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "checks": {
            "database": database_ok,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    });

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
