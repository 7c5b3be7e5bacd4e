//! HTTP endpoints of the webhook receiver.
//!
//! One route matters: `POST /webhook`, which acknowledges a notification with
//! 200 `"OK"` only after it has been verified against the payment API.
//! Rejections answer 400 so the sender's redelivery policy treats the
//! delivery as failed and may retry; every other path answers 404.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use till_client::PaymentsClient;
use till_types::Notification;

use crate::verifier;

/// JSON body returned on rejected notifications.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Builds the webhook router. State is the shared payment API client used
/// for verification lookups.
pub fn routes() -> Router<Arc<PaymentsClient>> {
    Router::new()
        .route("/webhook", post(post_webhook))
        .fallback(not_found)
}

/// `POST /webhook`: receives a payment/refund notification.
///
/// The body must decode to `{event: string, object: {id: string}}`; anything
/// else is a format error. A decoded notification is accepted only when the
/// authoritative object status fetched from the API equals the status the
/// event name claims. 200 acknowledges delivery; 400 signals failure so the
/// sender may redeliver.
#[instrument(skip_all)]
async fn post_webhook(State(client): State<Arc<PaymentsClient>>, body: Bytes) -> Response {
    let notification: Notification = match serde_json::from_slice(&body) {
        Ok(notification) => notification,
        Err(error) => {
            tracing::warn!(error = %error, "Malformed notification payload");
            return reject("Malformed notification");
        }
    };

    match verifier::verify_notification(&client, &notification).await {
        Ok(verified) => {
            tracing::info!(
                category = %verified.category,
                object_id = %verified.object_id,
                status = %verified.status,
                "Notification verified"
            );
            (StatusCode::OK, "OK").into_response()
        }
        Err(error) => {
            tracing::warn!(
                event = %notification.event,
                object_id = %notification.object.id,
                error = %error,
                "Notification rejected"
            );
            reject(&error.to_string())
        }
    }
}

fn reject(error: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Any route other than `POST /webhook`.
async fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use till_client::ApiConfig;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> Router {
        let config = ApiConfig::new(server.uri(), "shop-1", "sk_test").unwrap();
        routes().with_state(Arc::new(PaymentsClient::new(config)))
    }

    fn webhook_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn payment_notification(status: &str) -> Value {
        json!({
            "type": "notification",
            "event": format!("payment.{status}"),
            "object": {"id": "p-1", "status": status}
        })
    }

    async fn mount_payment(server: &MockServer, status: &str) {
        Mock::given(method("GET"))
            .and(path("/payments/p-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p-1",
                "status": status,
                "amount": {"value": "100.00", "currency": "RUB"},
                "paid": status == "succeeded"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn acknowledges_when_claimed_status_matches() {
        let server = MockServer::start().await;
        mount_payment(&server, "succeeded").await;

        let response = app_for(&server)
            .oneshot(webhook_request(payment_notification("succeeded")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn rejects_on_status_mismatch() {
        let server = MockServer::start().await;
        mount_payment(&server, "canceled").await;

        let response = app_for(&server)
            .oneshot(webhook_request(payment_notification("succeeded")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verifies_refund_notifications_against_refund_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/refunds/rf-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "rf-1",
                "status": "succeeded",
                "amount": {"value": "50.00", "currency": "RUB"},
                "payment_id": "p-1",
                "created_at": "2024-10-19T08:02:41Z"
            })))
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(webhook_request(json!({
                "event": "refund.succeeded",
                "object": {"id": "rf-1"}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_unknown_event_category_without_calling_api() {
        let server = MockServer::start().await;

        let response = app_for(&server)
            .oneshot(webhook_request(json!({
                "event": "deal.succeeded",
                "object": {"id": "d-1"}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_body_without_calling_api() {
        let server = MockServer::start().await;

        let response = app_for(&server)
            .oneshot(webhook_request(json!({"object": {"id": "p-1"}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app_for(&server)
            .oneshot(webhook_request(json!({
                "event": "payment.succeeded",
                "object": {}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_when_lookup_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/p-1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "description": "payment not found"
            })))
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(webhook_request(payment_notification("succeeded")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = MockServer::start().await;

        let request = Request::builder()
            .method("POST")
            .uri("/payments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app_for(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
