//! Webhook receiver entrypoint.
//!
//! Assembles and serves the HTTP endpoint that receives payment
//! notifications and verifies them against the payment API before
//! acknowledging.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control the binding address
//! - `PAYMENT_API_URL`, `PAYMENT_SHOP_ID`, `PAYMENT_SECRET_KEY` configure the
//!   payment API client used for verification
//! - `RUST_LOG` controls log filtering

use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use till_client::{ApiConfig, PaymentsClient};

use crate::config::Config;
use crate::shutdown::Shutdown;
use crate::{handlers, telemetry};

/// Initializes and runs the webhook receiver server.
///
/// - Loads `.env` variables.
/// - Initializes the tracing subscriber.
/// - Builds the payment API client from the environment; missing credentials
///   abort startup here, before anything listens.
/// - Serves the webhook routes until SIGTERM/SIGINT.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();

    telemetry::init();

    let config = Config::from_env();
    let api_config = ApiConfig::from_env()?;
    let client = Arc::new(PaymentsClient::new(api_config));

    let http_endpoints = handlers::routes()
        .with_state(client)
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting webhook receiver at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let shutdown = Shutdown::listen()?;
    let cancellation_token = shutdown.token();
    let graceful_shutdown = async move { cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    Ok(())
}
