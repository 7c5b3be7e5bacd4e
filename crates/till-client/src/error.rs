//! Uniform error shape for all client operations.

use reqwest::StatusCode;
use serde_json::Value;

use crate::transport::TransportError;
use till_types::MappingError;

/// Errors returned by [`crate::client::PaymentsClient`] operations.
///
/// Every operation returns a two-armed result; no panics cross this boundary
/// for expected failure modes. Non-200 responses are surfaced with their
/// status and decoded error body, never swallowed; anything the client cannot
/// attribute is normalized into [`ClientError::Unexpected`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network or connection failure. Not retried locally; idempotency keys
    /// make a caller-side retry of a POST safe at the remote API.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
    /// The payment API answered with a non-200 status.
    #[error("Payment API returned HTTP {status}")]
    Api { status: StatusCode, body: Value },
    /// A 200 body could not be mapped into a typed record.
    #[error("Failed to map payment API response: {0}")]
    Mapping(#[from] MappingError),
    /// Anything else: a malformed response shape or an internal failure.
    #[error("Unexpected payment API failure: {details}")]
    Unexpected { details: String },
}
