use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::estimator::EstimatorConfig;
use crate::window::WindowConfig;

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::settings";

use crate::{log_info, log_warn};

/// Engine tunables, read from a JSON file such as:
///
/// ```json
/// {
///   "window": { "length": 12, "padding": "repeat_last" },
///   "estimator": { "endpoint": "http://127.0.0.1:5050/api/predict", "timeout_ms": 10000 },
///   "lookback_hours": 12,
///   "refresh_interval_secs": 300
/// }
/// ```
///
/// Every field is optional; missing ones take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub window: WindowConfig,
    pub estimator: EstimatorConfig,
    /// How far back to query the sample source.
    pub lookback_hours: u32,
    pub refresh_interval_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            estimator: EstimatorConfig::default(),
            lookback_hours: 12,
            refresh_interval_secs: 300,
        }
    }
}

impl EngineSettings {
    /// Missing file gives defaults; an unreadable file is an error; a file
    /// that does not parse is logged and replaced by defaults. Values that
    /// parse but make no sense are rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    log_warn!("ignoring unparseable settings in {}: {err}", path.display());
                    EngineSettings::default()
                }
            }
        } else {
            log_info!("no settings at {}, using defaults", path.display());
            EngineSettings::default()
        };

        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        self.estimator.validate()?;
        if self.lookback_hours == 0 {
            bail!("lookback_hours must be at least 1");
        }
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be at least 1");
        }
        Ok(())
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.lookback_hours))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
