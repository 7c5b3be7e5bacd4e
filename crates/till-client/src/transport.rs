//! Thin HTTP layer between the client API and the remote payment processor.
//!
//! The transport attaches Basic Auth credentials to every request and a fresh
//! UUIDv4 `Idempotence-Key` header to every POST, so that a retransmitted
//! mutating request is treated by the remote side as a single logical
//! operation rather than a duplicate charge or refund.
//!
//! The transport deliberately does not interpret HTTP status codes: a non-2xx
//! response is a *successful* transport result carrying the status and body
//! for the caller to act on. Only network-level failures are errors here.
//! There are no retries and no timeout override beyond the client default.

use reqwest::{Client, StatusCode};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;

/// Header carrying the per-request idempotency key.
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

/// An HTTP response as the transport saw it: status plus raw body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Errors that can occur while talking to the payment API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to construct request URL: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP request failed: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Outbound HTTP adapter bound to one [`ApiConfig`].
///
/// `context` arguments are human-readable operation labels (e.g.
/// `"POST /payments"`) used in tracing and error messages.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ApiConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issues a POST with a JSON body, Basic Auth, and a freshly generated
    /// idempotency key. Each call generates its own key: two calls with
    /// identical arguments still produce distinct keys.
    pub async fn post<T>(
        &self,
        path: &str,
        context: &'static str,
        body: &T,
    ) -> Result<RawResponse, TransportError>
    where
        T: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(path, context)?;
        let idempotence_key = Uuid::new_v4();
        tracing::debug!(%url, %idempotence_key, context, "Sending POST to payment API");
        let response = self
            .client
            .post(url)
            .basic_auth(self.config.shop_id(), Some(self.config.secret_key()))
            .header(IDEMPOTENCE_KEY_HEADER, idempotence_key.to_string())
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Http { context, source })?;
        Self::read(response, context).await
    }

    /// Issues a GET with Basic Auth.
    pub async fn get(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(path, context)?;
        tracing::debug!(%url, context, "Sending GET to payment API");
        let response = self
            .client
            .get(url)
            .basic_auth(self.config.shop_id(), Some(self.config.secret_key()))
            .send()
            .await
            .map_err(|source| TransportError::Http { context, source })?;
        Self::read(response, context).await
    }

    fn endpoint(&self, path: &str, context: &'static str) -> Result<Url, TransportError> {
        self.config
            .base_url()
            .join(path)
            .map_err(|source| TransportError::UrlParse { context, source })
    }

    async fn read(
        response: reqwest::Response,
        context: &'static str,
    ) -> Result<RawResponse, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::ResponseBodyRead { context, source })?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        let config = ApiConfig::new(server.uri(), "shop-1", "sk_test").unwrap();
        HttpTransport::new(config)
    }

    #[tokio::test]
    async fn post_attaches_basic_auth_and_idempotence_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payments"))
            .and(header_exists("Authorization"))
            .and(header_exists(IDEMPOTENCE_KEY_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let response = transport
            .post("payments", "POST /payments", &json!({}))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn repeated_posts_carry_distinct_idempotence_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let body = json!({"amount": {"value": "10.00", "currency": "RUB"}});
        transport.post("payments", "POST /payments", &body).await.unwrap();
        transport.post("payments", "POST /payments", &body).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let keys: Vec<_> = requests
            .iter()
            .map(|r| {
                r.headers
                    .get(IDEMPOTENCE_KEY_HEADER)
                    .expect("idempotence key header")
                    .to_str()
                    .unwrap()
                    .to_owned()
            })
            .collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
    }

    #[tokio::test]
    async fn non_2xx_is_a_successful_transport_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/p-404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"description": "not found"})),
            )
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let response = transport
            .get("payments/p-404", "GET /payments/{id}")
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.contains("not found"));
    }

    #[tokio::test]
    async fn connection_failure_surfaces_as_transport_error() {
        // Port 9 (discard) is not listening.
        let config = ApiConfig::new("http://127.0.0.1:9", "shop-1", "sk_test").unwrap();
        let transport = HttpTransport::new(config);
        let result = transport.get("payments/p-1", "GET /payments/{id}").await;
        assert!(matches!(result, Err(TransportError::Http { .. })));
    }
}
