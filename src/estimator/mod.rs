pub mod config;
pub mod error;
pub mod http;
pub mod wire;

use std::future::Future;

pub use config::{EstimatorConfig, DEFAULT_ESTIMATOR_TIMEOUT_MS};
pub use error::EstimatorError;
pub use http::HttpEstimator;
pub use wire::{EstimatorRequest, EstimatorResponse, InsulinWindow};

/// A remote (or otherwise out-of-process) risk estimator.
///
/// The engine bounds every call with its own timeout, so implementations do
/// not have to.
pub trait RiskEstimatorClient: Send + Sync {
    fn estimate(
        &self,
        request: &EstimatorRequest,
    ) -> impl Future<Output = Result<EstimatorResponse, EstimatorError>> + Send;
}
