use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Resolves once a termination signal is received, used for graceful shutdown.
///
/// If the handlers cannot be installed the future never resolves and the
/// server keeps running.
#[cfg(unix)]
pub async fn wait_for_signal() {
    // Handle SIGTERM (sent by container runtimes on stop)
    let sigterm = signal(SignalKind::terminate());
    // Handle SIGINT (Ctrl+C)
    let sigint = signal(SignalKind::interrupt());

    let (mut sigterm, mut sigint) = match (sigterm, sigint) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to install signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

/// Resolves once a termination signal is received, used for graceful shutdown.
#[cfg(windows)]
pub async fn wait_for_signal() {
    let (mut ctrlc, mut ctrlbreak) = match (ctrl_c(), ctrl_break()) {
        (Ok(ctrlc), Ok(ctrlbreak)) => (ctrlc, ctrlbreak),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to install signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }
}
