pub mod config;
pub mod scoring;
pub mod timing;
pub mod trend;

pub use scoring::{estimate_risk, RiskPair};
pub use timing::EventTimes;
pub use trend::{analyze_trend, MonotoneRun, Trend, TrendDirection};
