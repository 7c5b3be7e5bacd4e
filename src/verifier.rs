//! Verification of inbound payment notifications.
//!
//! Notifications arrive unauthenticated on a public endpoint, so the embedded
//! object snapshot is a spoofing vector and is never trusted. A notification
//! moves through `Received -> Parsed -> Verifying` and ends `Verified` or
//! `Rejected`: the verifier re-queries the payment API for the object the
//! notification names and accepts only when the authoritative status equals
//! the status the event name claims.

use till_client::{ClientError, PaymentsClient};
use till_types::notification::{EventCategory, EventNameError, Notification};
use till_types::{PaymentId, RefundId};

/// Why a notification was rejected.
///
/// Every variant maps to an HTTP 400 at the endpoint; a rejection is never
/// silently downgraded to an accept.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Unrecognized event: {0}")]
    Event(#[from] EventNameError),
    #[error("Failed to fetch authoritative state for {object_id}: {source}")]
    Fetch {
        object_id: String,
        #[source]
        source: ClientError,
    },
    #[error(
        "Status mismatch for {object_id}: notification claims {claimed}, API reports {actual}"
    )]
    StatusMismatch {
        object_id: String,
        claimed: String,
        actual: String,
    },
}

/// A notification whose claim matched the authoritative state.
#[derive(Debug, Clone)]
pub struct Verified {
    pub category: EventCategory,
    pub object_id: String,
    pub status: String,
}

/// Checks a decoded notification against the payment API.
///
/// Parses the event name, fetches the named payment or refund, and compares
/// the claimed status with the fetched one. The unknown-category case fails
/// before any API call is made.
pub async fn verify_notification(
    client: &PaymentsClient,
    notification: &Notification,
) -> Result<Verified, VerificationError> {
    let event = notification.event_name()?;
    let object_id = notification.object.id.clone();

    let actual = match event.category {
        EventCategory::Payment => client
            .get_payment_info(&PaymentId::from(object_id.as_str()))
            .await
            .map(|payment| payment.status.to_string()),
        EventCategory::Refund => client
            .get_refund_info(&RefundId::from(object_id.as_str()))
            .await
            .map(|refund| refund.status.to_string()),
    }
    .map_err(|source| VerificationError::Fetch {
        object_id: object_id.clone(),
        source,
    })?;

    if actual == event.status {
        Ok(Verified {
            category: event.category,
            object_id,
            status: actual,
        })
    } else {
        Err(VerificationError::StatusMismatch {
            object_id,
            claimed: event.status,
            actual,
        })
    }
}
