//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::{DaemonConfig, StoreConfig};
use crate::error::{DaemonError, DaemonResult};
use crate::pipeline::Pipeline;
use crate::store::{self, WindowStore};
use loadwatch_observability::MetricsRegistry;
use std::sync::Arc;
use tokio::net::TcpListener;

/// loadwatch daemon server
pub struct Server {
    config: DaemonConfig,
    store: Arc<dyn WindowStore>,
    metrics: MetricsRegistry,
}

impl Server {
    /// Validate configuration and connect the store
    ///
    /// Fails if the store does not answer a ping.
    pub async fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config.pipeline.validate().map_err(DaemonError::Config)?;

        let store = store::connect(&config.store).await?;
        match &config.store {
            StoreConfig::Memory => tracing::info!("using in-memory store"),
            StoreConfig::Redis { addr } => tracing::info!(addr = %addr, "connected to redis"),
        }

        let metrics = MetricsRegistry::new()?;

        Ok(Self {
            config,
            store,
            metrics,
        })
    }

    /// Run the server until Ctrl+C or SIGTERM
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let Pipeline {
            queue,
            cache,
            workers,
        } = Pipeline::start(&self.config.pipeline, self.store.clone(), self.metrics.metrics());

        let state = AppState::new(
            queue,
            cache,
            self.metrics.clone(),
            self.config.server.max_body_size,
        );
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %addr, "loadwatch daemon listening");

        // The router owns the last queue handle; once serving stops the queue
        // closes and the workers drain it.
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!(
            workers = workers.size(),
            "loadwatch daemon shutting down, draining admitted samples"
        );
        workers.join().await;

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    #[tokio::test]
    async fn test_new_with_memory_store() {
        let server = Server::new(DaemonConfig::in_memory()).await.unwrap();
        assert!(server.store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_pipeline() {
        let config = DaemonConfig {
            pipeline: PipelineConfig {
                workers: 0,
                ..Default::default()
            },
            ..DaemonConfig::in_memory()
        };
        assert!(matches!(
            Server::new(config).await,
            Err(DaemonError::Config(_))
        ));
    }
}
