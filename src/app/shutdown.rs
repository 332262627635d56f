//! Ctrl-C handling.

use log::warn;

/// Resolves when the user presses Ctrl-C.
///
/// If the signal handler cannot be installed this never resolves, and the
/// process keeps the default behaviour of dying on SIGINT.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
