//! loadwatch Types - Core types for the load-sample analysis pipeline
//!
//! Producers submit [`Sample`]s (CPU utilisation and requests-per-second).
//! Workers fold each sample into a bounded sliding window of recent RPS
//! values and publish an [`Analysis`] snapshot of the rolling statistics.
//!
//! ## Key Concepts
//!
//! - **Sample**: one load observation, immutable once admitted
//! - **Window**: the newest-first sequence of the last `W` RPS values
//! - **Analysis**: rolling mean, population standard deviation, z-score and
//!   anomaly flag computed from one window read plus the triggering sample

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod analysis;
pub mod sample;

pub use analysis::{Analysis, WindowStats};
pub use sample::Sample;

/// Default sliding window capacity (`W`)
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Default |z| above which a sample is flagged as an anomaly
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Default admission queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Default number of analysis workers
pub const DEFAULT_WORKERS: usize = 2;

/// Store key holding the window list
pub const DEFAULT_WINDOW_KEY: &str = "rps_window";

/// Store key holding the last serialized analysis
pub const DEFAULT_RESULT_KEY: &str = "last_analysis";
