//! JSON bodies exchanged with the remote estimator.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::estimator::error::EstimatorError;
use crate::models::{Channel, PredictionResult, RiskAssessment, RiskLevel};
use crate::recommendation::generate_recommendation;
use crate::risk::timing::EventTimes;
use crate::window::FeatureWindow;

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::estimator";

use crate::log_debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsulinWindow {
    pub basal: Vec<f64>,
    pub bolus: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorRequest {
    pub glucose_readings: Vec<f64>,
    pub insulin: InsulinWindow,
    pub carbs: Vec<f64>,
    pub activity: Vec<f64>,
    pub heart_rate: Vec<f64>,
    pub gsr: Vec<f64>,
}

impl From<&FeatureWindow> for EstimatorRequest {
    fn from(window: &FeatureWindow) -> Self {
        Self {
            glucose_readings: window.channel(Channel::Glucose).to_vec(),
            insulin: InsulinWindow {
                basal: window.channel(Channel::InsulinBasal).to_vec(),
                bolus: window.channel(Channel::InsulinBolus).to_vec(),
            },
            carbs: window.channel(Channel::Meal).to_vec(),
            activity: window.channel(Channel::Activity).to_vec(),
            heart_rate: window.channel(Channel::HeartRate).to_vec(),
            gsr: window.channel(Channel::SkinConductance).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorResponse {
    pub current_glucose: Option<f64>,
    pub hypo_probability: f64,
    pub hyper_probability: f64,
    pub hypo_risk: String,
    pub hyper_risk: String,
    pub time_to_hypo_minutes: Option<f64>,
    pub time_to_hyper_minutes: Option<f64>,
    pub recommendation: String,
    pub prediction_id: String,
    pub timestamp: String,
}

impl EstimatorResponse {
    /// Validate the remote answer and turn it into a [`PredictionResult`].
    ///
    /// `local_glucose` stands in when the response carries no current value,
    /// and drives the local time estimate when an actionable risk arrives
    /// without one.
    pub fn into_prediction(
        self,
        local_glucose: Option<f64>,
    ) -> Result<PredictionResult, EstimatorError> {
        let current_glucose = match self.current_glucose {
            Some(value) if !value.is_finite() => {
                return Err(malformed(format!("current_glucose {value} is not finite")))
            }
            Some(value) => {
                let (min, max) = Channel::Glucose.valid_range();
                if !(min..=max).contains(&value) {
                    return Err(malformed(format!(
                        "current_glucose {value} outside [{min}, {max}]"
                    )));
                }
                Some(value)
            }
            None => local_glucose,
        };
        let local_times = current_glucose.map(EventTimes::from_glucose);

        let hypo = assessment(
            "hypo",
            self.hypo_probability,
            &self.hypo_risk,
            self.time_to_hypo_minutes,
            local_times.map(|times| times.hypo_minutes),
        )?;
        let hyper = assessment(
            "hyper",
            self.hyper_probability,
            &self.hyper_risk,
            self.time_to_hyper_minutes,
            local_times.map(|times| times.hyper_minutes),
        )?;

        if self.prediction_id.trim().is_empty() {
            return Err(malformed("empty prediction_id"));
        }
        let generated_at = parse_timestamp(&self.timestamp)?;

        let recommendation = if self.recommendation.trim().is_empty() {
            generate_recommendation(current_glucose, &hypo, &hyper)
        } else {
            self.recommendation
        };

        Ok(PredictionResult {
            current_glucose,
            hypo,
            hyper,
            recommendation,
            prediction_id: self.prediction_id,
            generated_at,
            is_fallback: false,
        })
    }
}

fn assessment(
    kind: &str,
    probability: f64,
    risk: &str,
    remote_minutes: Option<f64>,
    local_minutes: Option<f64>,
) -> Result<RiskAssessment, EstimatorError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(malformed(format!("{kind}_probability {probability} outside [0, 1]")));
    }

    let reported = RiskLevel::parse(risk)
        .ok_or_else(|| malformed(format!("unknown {kind}_risk '{risk}'")))?;
    let derived = RiskLevel::from_probability(probability);
    if reported != derived {
        log_debug!(
            "{kind} risk reported as {} but probability {:.3} bands as {}",
            reported.as_str(),
            probability,
            derived.as_str()
        );
    }

    if let Some(minutes) = remote_minutes {
        if !minutes.is_finite() {
            return Err(malformed(format!("time_to_{kind}_minutes {minutes} is not finite")));
        }
    }

    let quiet = RiskAssessment::from_probability(probability);
    if !quiet.is_actionable() {
        return Ok(quiet);
    }

    let minutes = remote_minutes
        .or(local_minutes)
        .ok_or_else(|| malformed(format!("actionable {kind} risk without time to event")))?;
    Ok(RiskAssessment::with_estimate(probability, minutes))
}

/// RFC 3339, or a naive ISO-8601 stamp read as UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, EstimatorError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| malformed(format!("invalid timestamp '{value}': {err}")))
}

fn malformed(reason: impl Into<String>) -> EstimatorError {
    EstimatorError::Malformed(reason.into())
}
