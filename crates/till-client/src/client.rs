//! The payment API client.
//!
//! [`PaymentsClient`] exposes the six operations of the remote payment
//! processor: create/capture/cancel payment, create refund, and the two
//! status lookups. Mutating operations return the raw decoded response body;
//! the lookups map the body into typed records. All operations normalize
//! failures into [`ClientError`].

use serde_json::{Value, json};
use tracing::instrument;

use till_types::{MonetaryAmount, Payment, PaymentId, Refund, RefundId};

use crate::config::{ApiConfig, ConfigError};
use crate::error::ClientError;
use crate::request::CreatePaymentRequest;
use crate::transport::{HttpTransport, RawResponse};

/// Client for the payment API, bound to one shop's credentials.
///
/// Cheap to clone; safe to share across tasks. Each call is an independent
/// logical operation with no state carried between invocations.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    transport: HttpTransport,
}

impl PaymentsClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            transport: HttpTransport::new(config),
        }
    }

    /// Builds a client from `PAYMENT_*` environment variables.
    ///
    /// Missing credentials fail here, before any network call.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn config(&self) -> &ApiConfig {
        self.transport.config()
    }

    /// `POST /payments`: creates a payment from the given request.
    ///
    /// On HTTP 200 returns the raw decoded body; the caller decides whether
    /// to map it through [`Payment::from_value`].
    #[instrument(skip_all, err)]
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<Value, ClientError> {
        let body = Value::Object(request.body());
        let response = self
            .transport
            .post("payments", "POST /payments", &body)
            .await?;
        expect_json(response)
    }

    /// `POST /payments/{id}/capture`: confirms an authorized payment.
    ///
    /// With `amount` set, captures that partial amount; the amount must be a
    /// complete value/currency pair. With `None`, sends an empty body and the
    /// full authorized amount is captured.
    #[instrument(skip_all, fields(payment_id = %payment_id), err)]
    pub async fn capture_payment(
        &self,
        payment_id: &PaymentId,
        amount: Option<&MonetaryAmount>,
    ) -> Result<Value, ClientError> {
        let body = match amount {
            Some(amount) => json!({"amount": amount}),
            None => json!({}),
        };
        let path = format!("payments/{payment_id}/capture");
        let response = self
            .transport
            .post(&path, "POST /payments/{id}/capture", &body)
            .await?;
        expect_json(response)
    }

    /// `POST /payments/{id}/cancel`: releases an authorization hold.
    ///
    /// Never issues a refund; only a payment in `waiting_for_capture` can be
    /// canceled, and the remote API enforces that.
    #[instrument(skip_all, fields(payment_id = %payment_id), err)]
    pub async fn cancel_payment(&self, payment_id: &PaymentId) -> Result<Value, ClientError> {
        let path = format!("payments/{payment_id}/cancel");
        let response = self
            .transport
            .post(&path, "POST /payments/{id}/cancel", &json!({}))
            .await?;
        expect_json(response)
    }

    /// `POST /refunds`: refunds (part of) a succeeded payment.
    ///
    /// No local precondition checks: the remote API validates that the
    /// payment has succeeded and that the unrefunded balance stays
    /// non-negative.
    #[instrument(skip_all, fields(payment_id = %payment_id), err)]
    pub async fn create_refund(
        &self,
        payment_id: &PaymentId,
        amount: &MonetaryAmount,
    ) -> Result<Value, ClientError> {
        let body = json!({
            "amount": amount,
            "payment_id": payment_id,
        });
        let response = self.transport.post("refunds", "POST /refunds", &body).await?;
        expect_json(response)
    }

    /// `GET /payments/{id}`: fetches the authoritative payment state.
    #[instrument(skip_all, fields(payment_id = %payment_id), err)]
    pub async fn get_payment_info(&self, payment_id: &PaymentId) -> Result<Payment, ClientError> {
        let path = format!("payments/{payment_id}");
        let response = self.transport.get(&path, "GET /payments/{id}").await?;
        let body = expect_json(response)?;
        Ok(Payment::from_value(body)?)
    }

    /// `GET /refunds/{id}`: fetches the authoritative refund state.
    #[instrument(skip_all, fields(refund_id = %refund_id), err)]
    pub async fn get_refund_info(&self, refund_id: &RefundId) -> Result<Refund, ClientError> {
        let path = format!("refunds/{refund_id}");
        let response = self.transport.get(&path, "GET /refunds/{id}").await?;
        let body = expect_json(response)?;
        Ok(Refund::from_value(body)?)
    }
}

/// Normalizes a raw response: 200 decodes to JSON, anything else becomes
/// [`ClientError::Api`] carrying the status and the decoded error body (or
/// the raw text when the body is not JSON).
fn expect_json(response: RawResponse) -> Result<Value, ClientError> {
    if response.status == reqwest::StatusCode::OK {
        serde_json::from_str(&response.body).map_err(|source| ClientError::Unexpected {
            details: format!("malformed response body: {source}"),
        })
    } else {
        let body = serde_json::from_str(&response.body)
            .unwrap_or_else(|_| Value::String(response.body.clone()));
        Err(ClientError::Api {
            status: response.status,
            body,
        })
    }
}
