//! Configuration for loadwatch-daemon

use loadwatch_types::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_RESULT_KEY, DEFAULT_WINDOW_KEY, DEFAULT_WINDOW_SIZE,
    DEFAULT_WORKERS, DEFAULT_Z_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Address used when `REDIS_ADDR` is not set
pub const DEFAULT_REDIS_ADDR: &str = "redis-master:6379";

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Ingestion pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Sliding-window store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-process store (for development/testing)
    Memory,

    /// Redis server
    Redis {
        /// `host:port` or a full `redis://` URL
        #[serde(default = "default_redis_addr")]
        addr: String,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Redis {
            addr: default_redis_addr(),
        }
    }
}

/// How a worker pushes, trims and reads the shared window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowUpdate {
    /// One transaction per sample; a worker's read always includes its own push
    #[default]
    Atomic,

    /// Three independent store calls; concurrent workers may interleave
    Sequential,
}

/// Ingestion pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Admission queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Number of analysis workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Sliding window capacity
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Anomaly threshold on |z|
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,

    /// Store key of the window list
    #[serde(default = "default_window_key")]
    pub window_key: String,

    /// Store key of the last analysis
    #[serde(default = "default_result_key")]
    pub result_key: String,

    /// Window update policy
    #[serde(default)]
    pub window_update: WindowUpdate,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKERS,
            window_size: DEFAULT_WINDOW_SIZE,
            z_threshold: DEFAULT_Z_THRESHOLD,
            window_key: DEFAULT_WINDOW_KEY.to_string(),
            result_key: DEFAULT_RESULT_KEY.to_string(),
            window_update: WindowUpdate::Atomic,
        }
    }
}

impl PipelineConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.queue_capacity == 0 {
            return Err("pipeline.queue_capacity must be at least 1".to_string());
        }
        if self.workers == 0 {
            return Err("pipeline.workers must be at least 1".to_string());
        }
        if self.window_size == 0 {
            return Err("pipeline.window_size must be at least 1".to_string());
        }
        if !self.z_threshold.is_finite() || self.z_threshold < 0.0 {
            return Err(format!(
                "pipeline.z_threshold must be a finite non-negative number, got {}",
                self.z_threshold
            ));
        }
        if self.window_key == self.result_key {
            return Err("pipeline.window_key and pipeline.result_key must differ".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_max_body_size() -> usize {
    64 * 1024
}

fn default_redis_addr() -> String {
    DEFAULT_REDIS_ADDR.to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_z_threshold() -> f64 {
    DEFAULT_Z_THRESHOLD
}

fn default_window_key() -> String {
    DEFAULT_WINDOW_KEY.to_string()
}

fn default_result_key() -> String {
    DEFAULT_RESULT_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from defaults, an optional file, then `LOADWATCH__*` variables
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Nested keys use a double underscore: LOADWATCH__PIPELINE__WORKERS=4
        builder = builder.add_source(
            config::Environment::with_prefix("LOADWATCH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Create a configuration backed by the in-memory store
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig::Memory,
            ..Default::default()
        }
    }
}
