//! Process shutdown: signal handling, a bounded drain of the server task,
//! and a bounded pool close.
//!
//! Connection tasks spawned by the server outlive an aborted accept loop, so
//! the pool close is bounded as well; otherwise a slow in-flight query would
//! hold shutdown until the request timeout fires.

use std::fmt::Display;
use std::time::Duration;

use tokio::task::JoinHandle;

/// How a [`drain_server`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The server finished all in-flight requests in time.
    Drained,
    /// The server task returned an error or panicked.
    Failed,
    /// The window elapsed and the server task was aborted.
    TimedOut,
}

/// Wait up to `window` for the server task to finish after graceful
/// shutdown has been triggered. On timeout the task is aborted and awaited,
/// so its future is dropped before this returns.
pub async fn drain_server<E: Display>(
    mut server: JoinHandle<Result<(), E>>,
    window: Duration,
) -> DrainOutcome {
    match tokio::time::timeout(window, &mut server).await {
        Ok(Ok(Ok(()))) => {
            tracing::info!("In-flight requests drained");
            DrainOutcome::Drained
        }
        Ok(Ok(Err(e))) => {
            tracing::error!(error = %e, "Server error during shutdown");
            DrainOutcome::Failed
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Server task panicked during shutdown");
            DrainOutcome::Failed
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = window.as_secs(),
                "Drain timed out, aborting in-flight requests",
            );
            server.abort();
            let _ = server.await;
            DrainOutcome::TimedOut
        }
    }
}

/// Close the pool, giving checked-out connections at most `window` to come
/// back.
pub async fn close_pool(pool: &booklib_db::DbPool, window: Duration) {
    match tokio::time::timeout(window, pool.close()).await {
        Ok(()) => tracing::info!("Database pool closed"),
        Err(_) => tracing::warn!(
            timeout_secs = window.as_secs(),
            "Database pool close timed out with connections still checked out",
        ),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
