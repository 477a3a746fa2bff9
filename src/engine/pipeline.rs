use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::analysis::{carbs_on_board, insulin_on_board};
use crate::engine::source::SampleSource;
use crate::estimator::{EstimatorError, EstimatorRequest, HttpEstimator, RiskEstimatorClient};
use crate::fallback::fallback_prediction;
use crate::models::{Channel, PredictionResult, TimedSample};
use crate::recommendation::generate_recommendation;
use crate::risk::{analyze_trend, estimate_risk, EventTimes, RiskPair};
use crate::settings::EngineSettings;
use crate::window::{FeatureWindow, WindowBuilder, WindowOutput};

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::engine";

use crate::{log_debug, log_error, log_info, log_warn};

/// Stateless prediction pipeline. Every method takes `&self`; share one
/// engine across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PredictionEngine<E = HttpEstimator> {
    settings: EngineSettings,
    builder: WindowBuilder,
    estimator: Option<E>,
}

impl PredictionEngine<HttpEstimator> {
    /// HTTP estimator when an endpoint is configured, local rules otherwise.
    pub fn from_settings(settings: EngineSettings) -> Result<Self> {
        settings.validate()?;
        let estimator = HttpEstimator::from_config(&settings.estimator)?;
        match &estimator {
            Some(client) => log_info!("remote estimator at {}", client.endpoint()),
            None => log_info!("no estimator endpoint configured, predicting locally"),
        }
        Ok(Self::build(settings, estimator))
    }

    /// Rules only; never touches the network.
    pub fn local(settings: EngineSettings) -> Self {
        Self::build(settings, None)
    }
}

impl<E: RiskEstimatorClient> PredictionEngine<E> {
    pub fn with_estimator(settings: EngineSettings, estimator: E) -> Self {
        Self::build(settings, Some(estimator))
    }

    fn build(settings: EngineSettings, estimator: Option<E>) -> Self {
        Self {
            builder: WindowBuilder::new(settings.window.clone()),
            settings,
            estimator,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Deterministic rule pipeline: window, trend, risk, event times, advice.
    pub fn predict_local(&self, samples: &[TimedSample], now: DateTime<Utc>) -> PredictionResult {
        let output = self.builder.build(samples);
        self.assess(&output, now)
    }

    /// Remote estimate bounded by the configured timeout; any failure yields
    /// the fallback result. Without an estimator this is [`Self::predict_local`].
    pub async fn predict(&self, samples: &[TimedSample], now: DateTime<Utc>) -> PredictionResult {
        let output = self.builder.build(samples);
        let Some(estimator) = &self.estimator else {
            return self.assess(&output, now);
        };

        let request = EstimatorRequest::from(&output.window);
        let timeout = self.settings.estimator.timeout();
        let started = Instant::now();

        let outcome = match tokio::time::timeout(timeout, estimator.estimate(&request)).await {
            Ok(Ok(response)) => response.into_prediction(output.latest_glucose()),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(EstimatorError::Timeout {
                after_ms: self.settings.estimator.timeout_ms,
            }),
        };

        match outcome {
            Ok(result) => {
                log_info!(
                    "remote prediction {} in {}ms",
                    result.prediction_id,
                    started.elapsed().as_millis()
                );
                result
            }
            Err(err) => {
                if err.is_unavailable() {
                    log_warn!("estimator unavailable, using fallback: {err}");
                } else {
                    log_error!("estimator answer rejected, using fallback: {err}");
                }
                fallback_prediction(output.latest_glucose(), now)
            }
        }
    }

    /// Like [`Self::predict`], but gives up with `None` once `cancel_token` fires.
    pub async fn predict_cancellable(
        &self,
        samples: &[TimedSample],
        now: DateTime<Utc>,
        cancel_token: &CancellationToken,
    ) -> Option<PredictionResult> {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_info!("prediction abandoned by caller");
                None
            }
            result = self.predict(samples, now) => Some(result),
        }
    }

    /// Query the configured lookback from `source`, then [`Self::predict`].
    pub async fn predict_from_source<S: SampleSource>(
        &self,
        source: &S,
        now: DateTime<Utc>,
    ) -> PredictionResult {
        let start = now - self.settings.lookback();
        match source.samples_between(start, now).await {
            Ok(samples) => self.predict(&samples, now).await,
            Err(err) => {
                log_error!("sample query failed, using fallback: {err:#}");
                fallback_prediction(None, now)
            }
        }
    }

    fn assess(&self, output: &WindowOutput, now: DateTime<Utc>) -> PredictionResult {
        let current_glucose = output.latest_glucose();
        let trend = analyze_trend(&output.glucose);

        let risks = match current_glucose {
            Some(value) => EventTimes::from_glucose(value).attach(estimate_risk(value, &trend)),
            None => RiskPair::baseline(),
        };
        let recommendation = generate_recommendation(current_glucose, &risks.hypo, &risks.hyper);

        let window = &output.window;
        if ENABLE_LOGS && log::log_enabled!(target: LOG_TAG, log::Level::Debug) {
            let (iob, cob) = on_board_totals(window);
            log_debug!(
                "trend {:?} ({:?}/min), iob {:.2}u, cob {:.0}g, hypo {:.2}, hyper {:.2}",
                trend.direction,
                trend.rate_per_minute,
                iob,
                cob,
                risks.hypo.probability,
                risks.hyper.probability
            );
        }

        PredictionResult {
            current_glucose,
            hypo: risks.hypo,
            hyper: risks.hyper,
            recommendation,
            prediction_id: prediction_id(window, now).to_string(),
            generated_at: now,
            is_fallback: false,
        }
    }
}

/// Insulin and carbs still active at the newest window slot.
fn on_board_totals(window: &FeatureWindow) -> (f64, f64) {
    let iob = insulin_on_board(window.channel(Channel::InsulinBolus));
    let cob = carbs_on_board(window.channel(Channel::Meal));
    (
        iob.last().copied().unwrap_or(0.0),
        cob.last().copied().unwrap_or(0.0),
    )
}

/// Name-based UUID over the window contents and request time, so identical
/// inputs always carry the same id.
fn prediction_id(window: &FeatureWindow, now: DateTime<Utc>) -> Uuid {
    let mut key = Vec::with_capacity(window.length() * Channel::ALL.len() * 8 + 16);
    for (channel, values) in window.iter() {
        key.extend_from_slice(channel.as_str().as_bytes());
        for value in values {
            key.extend_from_slice(&value.to_le_bytes());
        }
    }
    key.extend_from_slice(&now.timestamp_millis().to_le_bytes());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, &key)
}
