//! Rolling-window analysis snapshots

use crate::Sample;
use serde::{Deserialize, Serialize};

/// Statistics over one window read
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStats {
    /// Number of valid samples in the window
    pub count: usize,

    /// Arithmetic mean, 0 for an empty window
    pub mean: f64,

    /// Population standard deviation, 0 for an empty window
    pub std_dev: f64,

    /// Signed deviation of the triggering sample, 0 when undefined
    pub z_score: f64,

    /// `|z_score| > threshold`
    pub is_anomaly: bool,
}

/// The published result of processing one sample
///
/// Only the latest analysis is retained; every successful computation
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub count: usize,
    pub window_size: usize,
    pub rolling_avg: f64,
    pub std_dev: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
    pub last_rps: f64,
    pub last_cpu: f64,
    pub last_timestamp: i64,
    pub threshold_z: f64,
    pub computed_at: i64,
}

impl Analysis {
    /// Assemble a snapshot from window statistics and the sample that triggered them
    pub fn from_stats(
        stats: WindowStats,
        sample: &Sample,
        window_size: usize,
        threshold_z: f64,
        computed_at: i64,
    ) -> Self {
        Self {
            count: stats.count,
            window_size,
            rolling_avg: stats.mean,
            std_dev: stats.std_dev,
            z_score: stats.z_score,
            is_anomaly: stats.is_anomaly,
            last_rps: sample.rps,
            last_cpu: sample.cpu,
            last_timestamp: sample.timestamp,
            threshold_z,
            computed_at,
        }
    }
}
