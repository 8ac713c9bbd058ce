use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::router::create_router;
use crate::config::Config;
use crate::error::Result;
use crate::queue::QueueRegistry;

/// HTTP server bound to the address in [`Config`].
pub struct Server {
    config: Config,
    registry: Arc<QueueRegistry>,
}

impl Server {
    pub fn new(config: Config, registry: Arc<QueueRegistry>) -> Self {
        Self { config, registry }
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.listen_addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("relayq listening on {}", listener.local_addr()?);

        serve(listener, self.registry, shutdown_signal()).await
    }
}

/// Serves the broker on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, registry: Arc<QueueRegistry>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(registry))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
