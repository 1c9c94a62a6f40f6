//! Load samples submitted by producers

use serde::{Deserialize, Deserializer, Serialize};

/// A single load observation
///
/// Every field is optional on the wire and decodes to zero when absent or null.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Unix seconds; zero means "not set"
    #[serde(default, deserialize_with = "null_as_zero")]
    pub timestamp: i64,

    /// CPU utilisation
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cpu: f64,

    /// Requests per second
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rps: f64,
}

impl Sample {
    pub fn new(timestamp: i64, cpu: f64, rps: f64) -> Self {
        Self {
            timestamp,
            cpu,
            rps,
        }
    }

    /// Fill in an unset timestamp with `now` (unix seconds)
    pub fn stamped(mut self, now: i64) -> Self {
        if self.timestamp == 0 {
            self.timestamp = now;
        }
        self
    }
}

fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
