use serde::{Deserialize, Serialize};

use crate::risk::config::TREND_RATE_THRESHOLD;
use crate::window::GlucosePoint;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
    /// Fewer than two readings with distinct timestamps.
    Unknown,
}

/// Shape of the last three readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonotoneRun {
    /// Strictly decreasing; `avg_step` is the mean drop per reading (positive).
    Decreasing { avg_step: f64 },
    /// Strictly increasing; `avg_step` is the mean rise per reading (positive).
    Increasing { avg_step: f64 },
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// mg/dL per minute between the two most recent distinct-timestamp readings.
    pub rate_per_minute: Option<f64>,
    pub run: MonotoneRun,
}

impl Trend {
    pub fn unknown() -> Self {
        Self {
            direction: TrendDirection::Unknown,
            rate_per_minute: None,
            run: MonotoneRun::None,
        }
    }
}

/// Derive direction, rate and run shape from chronological glucose readings.
pub fn analyze_trend(glucose: &[GlucosePoint]) -> Trend {
    let rate_per_minute = latest_rate(glucose);
    let direction = match rate_per_minute {
        None => TrendDirection::Unknown,
        Some(rate) if rate > TREND_RATE_THRESHOLD => TrendDirection::Rising,
        Some(rate) if rate < -TREND_RATE_THRESHOLD => TrendDirection::Falling,
        Some(_) => TrendDirection::Stable,
    };

    Trend {
        direction,
        rate_per_minute,
        run: monotone_run(glucose),
    }
}

fn latest_rate(glucose: &[GlucosePoint]) -> Option<f64> {
    let latest = glucose.last()?;
    let previous = glucose
        .iter()
        .rev()
        .find(|point| point.timestamp < latest.timestamp)?;

    let minutes = (latest.timestamp - previous.timestamp).num_milliseconds() as f64 / 60_000.0;
    Some((latest.value - previous.value) / minutes)
}

fn monotone_run(glucose: &[GlucosePoint]) -> MonotoneRun {
    let [older, previous, latest] = match glucose {
        [.., a, b, c] => [a.value, b.value, c.value],
        _ => return MonotoneRun::None,
    };

    if older > previous && previous > latest {
        MonotoneRun::Decreasing {
            avg_step: (older - latest) / 2.0,
        }
    } else if older < previous && previous < latest {
        MonotoneRun::Increasing {
            avg_step: (latest - older) / 2.0,
        }
    } else {
        MonotoneRun::None
    }
}
