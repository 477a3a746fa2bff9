//! Clinical and probability thresholds shared by the risk stages.

/// Starting probability for both event kinds before any adjustment.
pub const BASE_PROBABILITY: f64 = 0.1;

/// Above this a risk is worth quoting a time for (and the band is at least `Medium`).
pub const ACTIONABLE_PROBABILITY: f64 = 0.3;

/// At or above this the band is `High`.
pub const HIGH_RISK_PROBABILITY: f64 = 0.7;

/// mg/dL below which glucose is low.
pub const HYPO_THRESHOLD: f64 = 70.0;

/// mg/dL above which glucose is high.
pub const HYPER_THRESHOLD: f64 = 180.0;

/// mg/dL below which hypo probability starts climbing regardless of trend.
pub const HYPO_WATCH_LEVEL: f64 = 90.0;

/// mg/dL above which hyper probability starts climbing regardless of trend.
pub const HYPER_WATCH_LEVEL: f64 = 140.0;

/// mg/dL per minute separating `Rising`/`Falling` from `Stable`.
pub const TREND_RATE_THRESHOLD: f64 = 2.0;

/// Applied to the opposite event's probability during a monotone run.
pub const OPPOSITE_RISK_DAMPING: f64 = 0.8;

/// Minutes under which a high risk becomes an urgent warning.
pub const URGENT_WINDOW_MINUTES: f64 = 30.0;
