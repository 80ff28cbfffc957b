//! Shutdown signal handling for the server binary.

use std::future::Future;
use std::io;

/// Resolve on SIGINT or SIGTERM (Ctrl-C elsewhere).
///
/// If no signal listener can be installed the future never resolves, so the
/// server keeps running instead of shutting down right after binding.
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(error = %err, "unix signal handlers unavailable, falling back to ctrl-c");
                signal_or_pending(tokio::signal::ctrl_c()).await;
            }
        }
    }
    #[cfg(not(unix))]
    signal_or_pending(tokio::signal::ctrl_c()).await;

    tracing::info!("shutdown signal received");
}

/// Await `listener`; on error, log it and wait forever.
pub(crate) async fn signal_or_pending<F>(listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = listener.await {
        tracing::error!(error = %err, "cannot listen for shutdown signals; stop the process externally");
        std::future::pending::<()>().await;
    }
}
