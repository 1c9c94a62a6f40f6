//! loadwatch daemon - load sample ingestion and anomaly detection
//!
//! The daemon provides:
//! - `POST /ingest` to admit CPU/RPS samples
//! - `GET /analyze` for the latest rolling-window analysis
//! - `GET /metrics` for Prometheus scraping

use clap::{Parser, ValueEnum};
use loadwatch_daemon::config::{DaemonConfig, StoreConfig, DEFAULT_REDIS_ADDR};
use loadwatch_daemon::error::{DaemonError, DaemonResult};
use loadwatch_daemon::Server;
use loadwatch_observability::{init_tracing, TracingConfig};
use std::net::SocketAddr;

/// Store backend selection
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreKind {
    Memory,
    Redis,
}

/// loadwatch daemon CLI
#[derive(Parser)]
#[command(name = "loadwatchd")]
#[command(about = "loadwatch daemon - rolling RPS statistics and anomaly detection", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LOADWATCH_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "LOADWATCH_LISTEN_ADDR")]
    listen: Option<SocketAddr>,

    /// Store backend
    #[arg(long, value_enum)]
    store: Option<StoreKind>,

    /// Redis address (host:port or redis:// URL)
    #[arg(long, env = "REDIS_ADDR")]
    redis_addr: Option<String>,

    /// Number of analysis workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Log level
    #[arg(long, env = "LOADWATCH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "LOADWATCH_LOG_JSON")]
    json: bool,
}

impl Cli {
    /// CLI flags win over file and environment configuration
    fn apply(self, config: &mut DaemonConfig) {
        if let Some(listen) = self.listen {
            config.server.listen_addr = listen;
        }

        let current_addr = match &config.store {
            StoreConfig::Redis { addr } => addr.clone(),
            StoreConfig::Memory => DEFAULT_REDIS_ADDR.to_string(),
        };
        config.store = match (self.store, self.redis_addr) {
            (Some(StoreKind::Memory), _) => StoreConfig::Memory,
            (Some(StoreKind::Redis), addr) => StoreConfig::Redis {
                addr: addr.unwrap_or(current_addr),
            },
            (None, Some(addr)) if matches!(config.store, StoreConfig::Redis { .. }) => {
                StoreConfig::Redis { addr }
            }
            (None, _) => config.store.clone(),
        };

        if let Some(workers) = self.workers {
            config.pipeline.workers = workers;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json {
            config.logging.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;
    cli.apply(&mut config);

    let mut tracing_config = TracingConfig::new("loadwatchd").with_log_level(&config.logging.level);
    if config.logging.json {
        tracing_config = tracing_config.with_json_format();
    }
    init_tracing(&tracing_config)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        workers = config.pipeline.workers,
        window = config.pipeline.window_size,
        policy = ?config.pipeline.window_update,
        "starting loadwatch daemon"
    );

    let server = Server::new(config).await?;
    server.run().await
}
