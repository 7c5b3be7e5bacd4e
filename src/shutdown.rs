//! Graceful shutdown on SIGTERM and SIGINT.

use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;

/// Cancels a token when the process receives SIGTERM or SIGINT.
///
/// The token is handed to the HTTP server as its graceful-shutdown trigger:
/// in-flight webhook deliveries finish, new connections stop being accepted.
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Registers the signal handlers and starts listening.
    ///
    /// Returns an error if signal registration fails.
    pub fn listen() -> Result<Self, std::io::Error> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
            trigger.cancel();
        });
        Ok(Self { token })
    }

    /// A clone of the cancellation token for handing to subsystems.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
