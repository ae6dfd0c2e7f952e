use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use json_share_core::document::{DocumentDraft, DocumentPatch, JsonDocument};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Document CRUD plus the public share endpoint.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/{id}",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/documents/public/{slug}", get(get_public_document))
}

/// The caller's documents, most recently updated first.
async fn list_documents(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<JsonDocument>>> {
    let documents = state.documents().list(&user_id).await?;
    Ok(Json(documents))
}

async fn create_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(draft): Json<DocumentDraft>,
) -> ApiResult<(axum::http::StatusCode, Json<JsonDocument>)> {
    let document = state.documents().create(&user_id, draft).await?;
    Ok((axum::http::StatusCode::CREATED, Json(document)))
}

async fn get_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JsonDocument>> {
    let document = state.documents().get(&user_id, id).await?;
    Ok(Json(document))
}

async fn update_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<DocumentPatch>,
) -> ApiResult<Json<JsonDocument>> {
    let document = state.documents().update(&user_id, id, patch).await?;
    Ok(Json(document))
}

async fn delete_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    state.documents().delete(&user_id, id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Read-only share access by slug. Deliberately unauthenticated; the slug
/// itself is the capability.
async fn get_public_document(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<JsonDocument>> {
    let document = state.documents().get_public(&slug).await?;
    Ok(Json(document))
}
