use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::engine::pipeline::PredictionEngine;
use crate::engine::source::{PredictionSink, SampleSource};
use crate::estimator::RiskEstimatorClient;

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::refresh";

use crate::{log_debug, log_info};

/// Re-run [`PredictionEngine::predict_from_source`] every `interval` and hand
/// each result to `sink`, until `cancel_token` fires. The first run happens
/// immediately.
pub async fn refresh_loop<E, S, K>(
    engine: Arc<PredictionEngine<E>>,
    source: S,
    sink: K,
    interval: Duration,
    cancel_token: CancellationToken,
) where
    E: RiskEstimatorClient,
    S: SampleSource,
    K: PredictionSink,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now();
                let result = tokio::select! {
                    result = engine.predict_from_source(&source, now) => result,
                    _ = cancel_token.cancelled() => {
                        log_info!("refresh loop shutting down mid-prediction");
                        break;
                    }
                };
                log_debug!(
                    "publishing {} (fallback: {})",
                    result.prediction_id,
                    result.is_fallback
                );
                sink.publish(&result);
            }
            _ = cancel_token.cancelled() => {
                log_info!("refresh loop shutting down");
                break;
            }
        }
    }
}

/// Owns one spawned [`refresh_loop`]. Dropping the controller cancels the
/// loop without waiting for it; await [`RefreshController::stop`] to join.
#[derive(Debug, Default)]
pub struct RefreshController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl RefreshController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start<E, S, K>(
        &mut self,
        engine: Arc<PredictionEngine<E>>,
        source: S,
        sink: K,
    ) -> Result<()>
    where
        E: RiskEstimatorClient + 'static,
        S: SampleSource + 'static,
        K: PredictionSink + 'static,
    {
        if self.handle.is_some() {
            bail!("refresh already active");
        }

        let interval = engine.settings().refresh_interval();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(refresh_loop(
            engine,
            source,
            sink,
            interval,
            cancel_token.clone(),
        ));
        log_info!("refresh started, every {}s", interval.as_secs());

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        match self.handle.take() {
            Some(handle) => handle.await.context("refresh loop task failed to join"),
            None => Ok(()),
        }
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
