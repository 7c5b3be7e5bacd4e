//! Core types for the till payment API client and webhook receiver.
//!
//! This crate holds the domain records exchanged with the remote payment
//! processor and the notification envelope it delivers over webhooks. All
//! records are value snapshots owned by the caller that received them: no
//! shared mutable state, no persistence.
//!
//! # Modules
//!
//! - [`amount`] — monetary values and currency codes in the API's wire format.
//! - [`payment`] — the payment record, its status lifecycle, and mapper.
//! - [`refund`] — the refund record and mapper.
//! - [`notification`] — the webhook notification envelope and event names.
//!
//! Records tolerate API growth: fields this crate does not know about are
//! preserved in a per-record `extra` map rather than dropped.

pub mod amount;
pub mod notification;
pub mod payment;
pub mod refund;

pub use amount::{CurrencyCode, MonetaryAmount, MonetaryValue};
pub use notification::{EventCategory, EventName, EventNameError, Notification};
pub use payment::{Payment, PaymentId, PaymentStatus};
pub use refund::{Refund, RefundId, RefundStatus};

/// Failure to construct a typed record from a decoded JSON object.
///
/// Raised only when a mandatory field is absent or a field value cannot
/// inhabit its declared type.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Malformed payment object: {0}")]
    Payment(#[source] serde_json::Error),
    #[error("Malformed refund object: {0}")]
    Refund(#[source] serde_json::Error),
}
