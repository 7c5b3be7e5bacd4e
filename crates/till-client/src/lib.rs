//! HTTP client for the till payment API.
//!
//! This crate wraps the remote payment processor's REST interface in a typed
//! client. It covers the full payment lifecycle: one-stage and two-stage
//! payments, capture and cancellation of authorization holds, refunds, and
//! status lookups.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use till_client::{ApiConfig, CreatePaymentRequest, PaymentsClient};
//! use till_types::{MonetaryAmount, MonetaryValue};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::new("https://api.example.com/v3", "shop-1", "sk_live")?;
//! let client = PaymentsClient::new(config);
//!
//! let amount = MonetaryAmount::new(MonetaryValue::from(100), "RUB".parse()?);
//! let request = CreatePaymentRequest::new(amount, "https://shop.example.com/return".parse()?)
//!     .description("Order 37");
//! let created = client.create_payment(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Idempotency
//!
//! Every mutating request carries a freshly generated UUIDv4
//! `Idempotence-Key` header, so a client-side retry of the same logical
//! operation cannot double-charge or double-refund at the remote API.
//!
//! ## Error Handling
//!
//! All operations return [`ClientError`]: transport failures, non-200 API
//! responses (with status and decoded error body), record-mapping failures,
//! and a normalized catch-all for unexpected shapes. Credentials are
//! validated when [`ApiConfig`] is constructed, before any network call.

mod client;
mod config;
mod error;
mod request;
mod transport;

pub use client::PaymentsClient;
pub use config::{ApiConfig, ConfigError};
pub use error::ClientError;
pub use request::{CreatePaymentRequest, REDIRECT_CONFIRMATION};
pub use transport::{HttpTransport, IDEMPOTENCE_KEY_HEADER, RawResponse, TransportError};
