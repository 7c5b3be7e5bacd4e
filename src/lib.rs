//! Webhook receiver for the till payment API.
//!
//! The payment processor reports state changes by POSTing notifications to a
//! public, unauthenticated endpoint. Trusting the embedded object snapshot
//! would be a spoofing vector, so this server re-queries the payment API for
//! the authoritative object state and acknowledges a delivery only when the
//! claimed status matches.
//!
//! Endpoints:
//! - `POST /webhook` — verify a notification; 200 `"OK"` acknowledges it,
//!   400 signals failure so the sender may redeliver
//! - anything else — 404
//!
//! # Modules
//!
//! - [`config`] — bind-address configuration from the environment.
//! - [`handlers`] — the axum routes.
//! - [`verifier`] — the fetch-and-compare verification flow.
//! - [`shutdown`] — SIGTERM/SIGINT handling for graceful shutdown.
//! - [`telemetry`] — tracing subscriber setup.
//!
//! Client-side payment operations live in the `till-client` crate; domain
//! records in `till-types`.

pub mod config;
pub mod handlers;
pub mod shutdown;
pub mod telemetry;
pub mod verifier;

mod run;

pub use run::run;
