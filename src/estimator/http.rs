use std::time::Duration;

use anyhow::{Context, Result};

use crate::estimator::config::EstimatorConfig;
use crate::estimator::error::EstimatorError;
use crate::estimator::wire::{EstimatorRequest, EstimatorResponse};
use crate::estimator::RiskEstimatorClient;

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::estimator";

use crate::log_debug;

/// JSON-over-HTTP estimator client (`POST` the window, read one prediction).
#[derive(Debug, Clone)]
pub struct HttpEstimator {
    client: reqwest::Client,
    endpoint: String,
    timeout_ms: u64,
}

impl HttpEstimator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build estimator HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    /// `None` when no endpoint is configured.
    pub fn from_config(config: &EstimatorConfig) -> Result<Option<Self>> {
        config
            .endpoint
            .as_ref()
            .map(|endpoint| Self::new(endpoint.clone(), config.timeout()))
            .transpose()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> EstimatorError {
        if err.is_timeout() {
            EstimatorError::Timeout {
                after_ms: self.timeout_ms,
            }
        } else if err.is_decode() {
            EstimatorError::Malformed(err.to_string())
        } else {
            EstimatorError::Network(err.to_string())
        }
    }
}

impl RiskEstimatorClient for HttpEstimator {
    async fn estimate(
        &self,
        request: &EstimatorRequest,
    ) -> Result<EstimatorResponse, EstimatorError> {
        log_debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EstimatorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<EstimatorResponse>()
            .await
            .map_err(|err| self.transport_error(err))
    }
}
