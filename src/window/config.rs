use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Number of slots per channel the remote estimator was trained on.
pub const DEFAULT_WINDOW_LENGTH: usize = 12;

/// How a channel with fewer than `length` samples is filled up.
///
/// Padding is appended after the newest real sample. A channel with no
/// samples at all is filled with its channel default under every policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaddingPolicy {
    /// Repeat the most recent value: an unobserved stretch continues the last known state.
    #[default]
    RepeatLast,
    Zero,
    ChannelDefault,
}

/// Shape of the per-channel feature window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub length: usize,
    pub padding: PaddingPolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_WINDOW_LENGTH,
            padding: PaddingPolicy::RepeatLast,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            bail!("window length must be at least 1");
        }
        Ok(())
    }
}
