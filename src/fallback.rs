//! Degraded prediction from the current glucose value alone.
//!
//! Used whenever the estimation path cannot complete. Pure and infallible.

use chrono::{DateTime, Utc};

use crate::analysis::GlucoseStatus;
use crate::models::{PredictionResult, RiskAssessment};
use crate::recommendation::{HIGH_GLUCOSE_MESSAGE, LOW_GLUCOSE_MESSAGE, STABLE_MESSAGE};
use crate::risk::config::BASE_PROBABILITY;

/// Assumed value when no reading is known.
pub const FALLBACK_GLUCOSE: f64 = 120.0;

const EVENT_PROBABILITY: f64 = 0.9;

/// Classify `current_glucose`, or [`FALLBACK_GLUCOSE`] when it is unknown.
/// An unknown value stays `None` in the result; the assumed 120 is never
/// reported as a reading.
pub fn fallback_prediction(current_glucose: Option<f64>, now: DateTime<Utc>) -> PredictionResult {
    let status = GlucoseStatus::classify(current_glucose.unwrap_or(FALLBACK_GLUCOSE));
    let is_low = status == GlucoseStatus::Low;
    let is_high = status == GlucoseStatus::High;

    let recommendation = match status {
        GlucoseStatus::Low => LOW_GLUCOSE_MESSAGE,
        GlucoseStatus::High => HIGH_GLUCOSE_MESSAGE,
        GlucoseStatus::Normal => STABLE_MESSAGE,
    };

    PredictionResult {
        current_glucose,
        hypo: condition_assessment(is_low),
        hyper: condition_assessment(is_high),
        recommendation: recommendation.to_string(),
        prediction_id: format!("fallback-{}", now.timestamp_millis()),
        generated_at: now,
        is_fallback: true,
    }
}

fn condition_assessment(holds: bool) -> RiskAssessment {
    if holds {
        RiskAssessment::with_estimate(EVENT_PROBABILITY, 0.0)
    } else {
        RiskAssessment::from_probability(BASE_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_low_glucose() {
        let result = fallback_prediction(Some(50.0), now());

        assert_eq!(result.hypo.probability, 0.9);
        assert_eq!(result.hyper.probability, 0.1);
        assert_eq!(result.hypo.risk_level, RiskLevel::High);
        assert_eq!(result.hypo.time_to_event_minutes, Some(0.0));
        assert_eq!(result.hyper.time_to_event_minutes, None);
        assert!(result.recommendation.starts_with("URGENT"));
        assert!(result.is_fallback);
    }

    #[test]
    fn test_high_glucose() {
        let result = fallback_prediction(Some(200.0), now());

        assert_eq!(result.hyper.probability, 0.9);
        assert_eq!(result.hypo.probability, 0.1);
        assert_eq!(result.hyper.time_to_event_minutes, Some(0.0));
        assert_eq!(result.hypo.time_to_event_minutes, None);
        assert_eq!(result.recommendation, HIGH_GLUCOSE_MESSAGE);
    }

    #[test]
    fn test_normal_glucose() {
        let result = fallback_prediction(Some(120.0), now());

        assert_eq!(result.hypo.probability, 0.1);
        assert_eq!(result.hyper.probability, 0.1);
        assert_eq!(result.hypo.risk_level, RiskLevel::Low);
        assert_eq!(result.hyper.risk_level, RiskLevel::Low);
        assert_eq!(result.hypo.time_to_event_minutes, None);
        assert_eq!(result.hyper.time_to_event_minutes, None);
        assert_eq!(result.recommendation, STABLE_MESSAGE);
    }

    #[test]
    fn test_unknown_glucose_assumes_normal() {
        let result = fallback_prediction(None, now());

        assert_eq!(result.current_glucose, None);
        assert_eq!(result, fallback_prediction(None, now()));
        assert_eq!(result.hypo.risk_level, RiskLevel::Low);
        assert_eq!(result.prediction_id, format!("fallback-{}", now().timestamp_millis()));
    }
}
