use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on one remote estimation round trip.
pub const DEFAULT_ESTIMATOR_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Full URL of the prediction endpoint. `None` keeps every request local.
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_ESTIMATOR_TIMEOUT_MS,
        }
    }
}

impl EstimatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            bail!("estimator timeout must be greater than zero");
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                bail!("estimator endpoint '{endpoint}' is not an http(s) URL");
            }
        }
        Ok(())
    }
}
