//! Configuration for the webhook receiver server.
//!
//! The bind address comes from `HOST` and `PORT` with hardcoded fallbacks;
//! the payment API connection is configured separately through
//! [`till_client::ApiConfig`] and its `PAYMENT_*` variables.

use std::net::{IpAddr, SocketAddr};

/// Server configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    host: IpAddr,
    port: u16,
}

impl Config {
    /// Resolves the configuration: `$HOST`/`$PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: config_defaults::default_host(),
            port: config_defaults::default_port(),
        }
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The socket address to bind the webhook listener to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

pub mod config_defaults {
    use std::env;
    use std::net::{IpAddr, Ipv4Addr};

    pub const DEFAULT_PORT: u16 = 8080;

    /// Returns the default port value with fallback: $PORT env var -> 8080
    pub fn default_port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// Returns the default host value with fallback: $HOST env var -> 0.0.0.0
    pub fn default_host() -> IpAddr {
        env::var("HOST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}
