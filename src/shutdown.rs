//! Process signals that stop the server.

use std::future::{Future, pending};
use tokio::signal;
use tracing::{error, info};

/// Resolves on Ctrl+C or SIGTERM.
///
/// The SIGTERM handler is installed when this is called, not when the future
/// is first polled. A handler that fails to install is logged and never fires.
/// Must be called inside a Tokio runtime.
pub fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    #[cfg(unix)]
    let sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(sigterm) => Some(sigterm),
        Err(e) => {
            error!("failed to install SIGTERM handler: {e}");
            None
        }
    };

    async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("failed to install Ctrl+C handler: {e}");
                pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match sigterm {
                Some(mut sigterm) => {
                    sigterm.recv().await;
                }
                None => pending::<()>().await,
            }
        };

        #[cfg(not(unix))]
        let terminate = pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("received Ctrl+C, shutting down"),
            _ = terminate => info!("received SIGTERM, shutting down"),
        }
    }
}
