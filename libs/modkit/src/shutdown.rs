use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolve once the process is asked to stop (SIGTERM, SIGINT or Ctrl+C).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("shutdown: SIGTERM received"),
            _ = sigint.recv()  => tracing::info!("shutdown: SIGINT received"),
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown: Ctrl+C received");
        Ok(())
    }
}

/// Spawn a task that cancels `token` on the first shutdown signal.
pub fn cancel_on_shutdown(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            res = wait_for_shutdown() => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "shutdown: signal listener failed");
                }
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_exits_when_token_is_cancelled_elsewhere() {
        let token = CancellationToken::new();
        let handle = cancel_on_shutdown(token.clone());
        token.cancel();
        handle.await.unwrap();
        assert!(token.is_cancelled());
    }
}
