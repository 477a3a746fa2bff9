use thiserror::Error;

/// Why the remote estimator could not produce a usable answer.
///
/// None of these reach the end user: the engine logs them and substitutes a
/// fallback prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("estimator did not answer within {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("estimator unreachable: {0}")]
    Network(String),
    #[error("estimator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed estimator response: {0}")]
    Malformed(String),
}

impl EstimatorError {
    /// Transport-level failures, as opposed to a well-delivered bad answer.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EstimatorError::Timeout { .. }
                | EstimatorError::Network(_)
                | EstimatorError::Status { .. }
        )
    }
}
