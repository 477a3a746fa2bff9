//! Maps the current value and both assessments to one advisory line.
//!
//! Rules are checked most severe first; the first match wins.

use crate::analysis::GlucoseStatus;
use crate::models::RiskAssessment;
use crate::risk::config::{ACTIONABLE_PROBABILITY, HIGH_RISK_PROBABILITY, URGENT_WINDOW_MINUTES};

pub const LOG_READING_MESSAGE: &str =
    "Please log your glucose level for personalized recommendations.";
pub const LOW_GLUCOSE_MESSAGE: &str =
    "URGENT: Your glucose is low. Consume 15-20g of fast-acting carbohydrates immediately.";
pub const HIGH_GLUCOSE_MESSAGE: &str =
    "Your glucose is currently high. Check for missed insulin doses or recent high-carb meals.";
pub const MODERATE_HYPER_MESSAGE: &str =
    "Moderate risk of high glucose. Be mindful of carb intake and insulin timing.";
pub const STABLE_MESSAGE: &str =
    "Your glucose levels appear stable. Continue with regular monitoring.";

pub fn generate_recommendation(
    current_glucose: Option<f64>,
    hypo: &RiskAssessment,
    hyper: &RiskAssessment,
) -> String {
    let Some(current) = current_glucose else {
        return LOG_READING_MESSAGE.to_string();
    };

    match GlucoseStatus::classify(current) {
        GlucoseStatus::Low => return LOW_GLUCOSE_MESSAGE.to_string(),
        GlucoseStatus::High => return HIGH_GLUCOSE_MESSAGE.to_string(),
        GlucoseStatus::Normal => {}
    }

    if let Some(minutes) = urgent_minutes(hypo) {
        return format!(
            "WARNING: High risk of low glucose in {} minutes. Consider consuming 15g of carbs.",
            minutes.round()
        );
    }

    if let Some(minutes) = urgent_minutes(hyper) {
        return format!(
            "ALERT: High risk of high glucose in {} minutes. Check recent carb intake and insulin.",
            minutes.round()
        );
    }

    if hypo.probability > ACTIONABLE_PROBABILITY {
        let minutes = hypo.time_to_event_minutes.unwrap_or(0.0);
        return format!(
            "Moderate risk of low glucose. Monitor levels over the next {} minutes.",
            minutes.round()
        );
    }

    if hyper.probability > ACTIONABLE_PROBABILITY {
        return MODERATE_HYPER_MESSAGE.to_string();
    }

    STABLE_MESSAGE.to_string()
}

fn urgent_minutes(assessment: &RiskAssessment) -> Option<f64> {
    if assessment.probability <= HIGH_RISK_PROBABILITY {
        return None;
    }
    assessment
        .time_to_event_minutes
        .filter(|&minutes| minutes < URGENT_WINDOW_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(probability: f64, minutes: Option<f64>) -> RiskAssessment {
        RiskAssessment {
            time_to_event_minutes: minutes,
            ..RiskAssessment::from_probability(probability)
        }
    }

    fn quiet() -> RiskAssessment {
        assessment(0.1, None)
    }

    #[test]
    fn test_missing_glucose_asks_for_reading() {
        let text = generate_recommendation(None, &assessment(0.9, Some(5.0)), &quiet());
        assert_eq!(text, LOG_READING_MESSAGE);
    }

    #[test]
    fn test_current_value_outranks_predictions() {
        let low = generate_recommendation(Some(62.0), &quiet(), &assessment(0.9, Some(5.0)));
        assert_eq!(low, LOW_GLUCOSE_MESSAGE);
        assert!(low.contains("15-20g"));

        let high = generate_recommendation(Some(210.0), &assessment(0.9, Some(5.0)), &quiet());
        assert_eq!(high, HIGH_GLUCOSE_MESSAGE);
    }

    #[test]
    fn test_urgent_hypo_names_minutes() {
        let text = generate_recommendation(Some(74.0), &assessment(0.85, Some(12.4)), &quiet());
        assert!(text.starts_with("WARNING"));
        assert!(text.contains("12 minutes"));
    }

    #[test]
    fn test_urgent_hyper_names_minutes() {
        let text = generate_recommendation(Some(175.0), &quiet(), &assessment(0.8, Some(20.0)));
        assert!(text.starts_with("ALERT"));
        assert!(text.contains("20 minutes"));
    }

    #[test]
    fn test_high_risk_far_away_is_moderate() {
        let text = generate_recommendation(Some(95.0), &assessment(0.75, Some(105.0)), &quiet());
        assert_eq!(
            text,
            "Moderate risk of low glucose. Monitor levels over the next 105 minutes."
        );
    }

    #[test]
    fn test_moderate_hyper_and_stable() {
        let hyper = generate_recommendation(Some(160.0), &quiet(), &assessment(0.45, Some(70.0)));
        assert_eq!(hyper, MODERATE_HYPER_MESSAGE);

        let stable = generate_recommendation(Some(110.0), &quiet(), &quiet());
        assert_eq!(stable, STABLE_MESSAGE);
    }

    #[test]
    fn test_hypo_checked_before_hyper() {
        let text = generate_recommendation(
            Some(120.0),
            &assessment(0.4, Some(150.0)),
            &assessment(0.5, Some(150.0)),
        );
        assert!(text.contains("low glucose"));
    }
}
