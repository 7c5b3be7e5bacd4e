//! The payment record returned by the payment API.
//!
//! Payments are read-only snapshots: they are created by a payment-creation
//! call and mutated only by the remote API (capture and cancel move the
//! status). Fields the API adds in the future survive a round trip through
//! the [`Payment::extra`] side-map instead of being dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;
use url::Url;

use crate::MappingError;
use crate::amount::MonetaryAmount;

/// Identifier of a payment, assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PaymentId {
    fn from(value: String) -> Self {
        PaymentId(value)
    }
}

impl From<&str> for PaymentId {
    fn from(value: &str) -> Self {
        PaymentId(value.to_owned())
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a payment.
///
/// A two-stage payment is first authorized (`waiting_for_capture`) and later
/// captured into `succeeded` or released into `canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    WaitingForCapture,
    Succeeded,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::WaitingForCapture => "waiting_for_capture",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Canceled => "canceled",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receipt registration progress, when fiscalization applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptRegistration {
    Pending,
    Succeeded,
    Canceled,
}

/// How the customer confirms the payment.
///
/// For the `redirect` flow the API returns a `confirmation_url` to send the
/// customer to, and calls back to the `return_url` supplied at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<Url>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A snapshot of a payment object.
///
/// Mandatory fields are `id`, `status`, `amount`, and `paid`; everything else
/// the API may omit. Unrecognized fields are preserved in [`Payment::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub status: PaymentStatus,
    pub amount: MonetaryAmount,
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<MonetaryAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_registration: Option<ReceiptRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    /// Builds a typed payment record from a decoded JSON object.
    ///
    /// Fails only when a mandatory field is absent or cannot inhabit its
    /// declared type.
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        serde_json::from_value(value).map_err(MappingError::Payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment_json() -> Value {
        json!({
            "id": "2e8b7f3a-000f-5000-8000-1b68e7b15f3f",
            "status": "waiting_for_capture",
            "amount": {"value": "100.00", "currency": "RUB"},
            "paid": true,
            "created_at": "2024-10-18T10:51:18.139Z",
            "description": "Order 37",
            "confirmation": {
                "type": "redirect",
                "confirmation_url": "https://pay.example.com/confirm/2e8b7f3a"
            },
            "test": false,
            "refunded_amount": {"value": "0.00", "currency": "RUB"},
            "metadata": {"order_id": "37"}
        })
    }

    #[test]
    fn maps_known_fields() {
        let payment = Payment::from_value(payment_json()).unwrap();
        assert_eq!(payment.id.as_str(), "2e8b7f3a-000f-5000-8000-1b68e7b15f3f");
        assert_eq!(payment.status, PaymentStatus::WaitingForCapture);
        assert_eq!(payment.amount.currency.as_str(), "RUB");
        assert!(payment.paid);
        assert_eq!(payment.description.as_deref(), Some("Order 37"));
        let confirmation = payment.confirmation.unwrap();
        assert_eq!(confirmation.kind, "redirect");
        assert_eq!(payment.test, Some(false));
        assert_eq!(
            payment.metadata.unwrap().get("order_id"),
            Some(&json!("37"))
        );
    }

    #[test]
    fn round_trips_field_values() {
        let source = payment_json();
        let payment = Payment::from_value(source.clone()).unwrap();
        let encoded = serde_json::to_value(&payment).unwrap();
        assert_eq!(encoded["id"], source["id"]);
        assert_eq!(encoded["status"], source["status"]);
        assert_eq!(encoded["amount"], source["amount"]);
        assert_eq!(encoded["paid"], source["paid"]);
        assert_eq!(encoded["description"], source["description"]);
    }

    #[test]
    fn preserves_unrecognized_fields() {
        let mut source = payment_json();
        source["income_amount"] = json!({"value": "96.50", "currency": "RUB"});
        let payment = Payment::from_value(source).unwrap();
        assert_eq!(
            payment.extra.get("income_amount"),
            Some(&json!({"value": "96.50", "currency": "RUB"}))
        );
    }

    #[test]
    fn missing_mandatory_field_fails() {
        let mut source = payment_json();
        source.as_object_mut().unwrap().remove("paid");
        assert!(Payment::from_value(source).is_err());
    }

    #[test]
    fn unknown_status_fails() {
        let mut source = payment_json();
        source["status"] = json!("on_hold");
        assert!(Payment::from_value(source).is_err());
    }
}
