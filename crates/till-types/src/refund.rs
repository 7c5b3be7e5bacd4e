//! The refund record returned by the payment API.
//!
//! Same snapshot semantics as [`crate::payment::Payment`]: the record is a
//! value owned by the caller, never persisted, and only the remote API moves
//! its status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;

use crate::MappingError;
use crate::amount::MonetaryAmount;
use crate::payment::PaymentId;

/// Identifier of a refund, assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefundId(String);

impl RefundId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RefundId {
    fn from(value: String) -> Self {
        RefundId(value)
    }
}

impl From<&str> for RefundId {
    fn from(value: &str) -> Self {
        RefundId(value.to_owned())
    }
}

impl Display for RefundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Canceled,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "pending",
            RefundStatus::Succeeded => "succeeded",
            RefundStatus::Canceled => "canceled",
        }
    }
}

impl Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who canceled a refund and why. Present only on canceled refunds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub party: String,
    pub reason: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acquirer-side authorization data for a refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundAuthorizationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrn: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A snapshot of a refund object.
///
/// Mandatory fields are `id`, `status`, `amount`, `payment_id`, and
/// `created_at`. The `payment_id` back-reference is lookup-only, not an
/// ownership relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub id: RefundId,
    pub status: RefundStatus,
    pub amount: MonetaryAmount,
    pub payment_id: PaymentId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_authorization_details: Option<RefundAuthorizationDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Refund {
    /// Builds a typed refund record from a decoded JSON object.
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        serde_json::from_value(value).map_err(MappingError::Refund)
    }
}
