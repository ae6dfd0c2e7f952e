use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::{extract::State, routing::post, Json, Router};
use json_share_core::identity::IdentityEvent;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const HEADER_ID: &str = "webhook-id";
const HEADER_TIMESTAMP: &str = "webhook-timestamp";
const HEADER_SIGNATURE: &str = "webhook-signature";

/// Identity-provider webhook endpoint.
pub fn routes() -> Router<AppState> {
    Router::new().route("/webhooks/identity", post(identity_webhook))
}

/// Verify the delivery signature over the raw body, decode the event once,
/// and reconcile. Verification failures reject before anything is
/// processed; unknown event types are acknowledged untouched.
async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let msg_id = required_header(&headers, HEADER_ID)?;
    let timestamp = required_header(&headers, HEADER_TIMESTAMP)?;
    let signature = required_header(&headers, HEADER_SIGNATURE)?;

    state.verifier().verify(msg_id, timestamp, signature, &body)?;

    let event = IdentityEvent::decode(&body)
        .map_err(|err| ApiError::BadRequest(format!("malformed webhook payload: {err}")))?;

    state.ingestor().apply(event).await?;
    Ok(Json(json!({ "success": true })))
}

fn required_header<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("missing header: {name}")))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::{HEADER_ID, HEADER_SIGNATURE, HEADER_TIMESTAMP};
    use crate::routes::test_support::{test_state, test_verifier};

    fn signed_request(payload: &str) -> Request<Body> {
        let verifier = test_verifier();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = verifier.sign("msg_test", &timestamp, payload.as_bytes());
        Request::builder()
            .method("POST")
            .uri("/webhooks/identity")
            .header(HEADER_ID, "msg_test")
            .header(HEADER_TIMESTAMP, timestamp)
            .header(HEADER_SIGNATURE, signature)
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_signature_headers_are_rejected() {
        let app = crate::routes::build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhooks/identity")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected() {
        let app = crate::routes::build_router(test_state());
        let mut request = signed_request(r#"{"type":"user.deleted","data":{"id":"u1"}}"#);
        request
            .headers_mut()
            .insert(HEADER_SIGNATURE, "v1,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn tampered_body_is_rejected() {
        let app = crate::routes::build_router(test_state());
        let mut request = signed_request(r#"{"type":"user.deleted","data":{"id":"u1"}}"#);
        *request.body_mut() = Body::from(r#"{"type":"user.deleted","data":{"id":"someone-else"}}"#);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_event_type_is_acknowledged() {
        // Unknown events never touch the store, so the lazy pool is enough.
        let app = crate::routes::build_router(test_state());
        let request = signed_request(r#"{"type":"organization.created","data":{"id":"org_1"}}"#);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_known_event_is_rejected() {
        let app = crate::routes::build_router(test_state());
        let request = signed_request(r#"{"type":"user.deleted","data":{}}"#);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
