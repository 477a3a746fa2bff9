use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::config::{ACTIONABLE_PROBABILITY, HIGH_RISK_PROBABILITY};

/// Discrete band derived from a continuous probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < ACTIONABLE_PROBABILITY {
            RiskLevel::Low
        } else if probability < HIGH_RISK_PROBABILITY {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// Probability of one event kind, its band, and (when actionable) the
/// estimated minutes until it happens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub time_to_event_minutes: Option<f64>,
}

impl RiskAssessment {
    /// Assessment with no time estimate. `probability` is clamped to [0, 1].
    pub fn from_probability(probability: f64) -> Self {
        let probability = probability.clamp(0.0, 1.0);
        Self {
            probability,
            risk_level: RiskLevel::from_probability(probability),
            time_to_event_minutes: None,
        }
    }

    /// Attaches `minutes` only when the probability is actionable. Negative
    /// estimates mean the event is already under way and are reported as 0.
    pub fn with_estimate(probability: f64, minutes: f64) -> Self {
        let mut assessment = Self::from_probability(probability);
        if assessment.is_actionable() {
            assessment.time_to_event_minutes = Some(minutes.max(0.0));
        }
        assessment
    }

    pub fn is_actionable(&self) -> bool {
        self.probability > ACTIONABLE_PROBABILITY
    }
}

/// Final output of one prediction request. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub current_glucose: Option<f64>,
    pub hypo: RiskAssessment,
    pub hyper: RiskAssessment,
    pub recommendation: String,
    pub prediction_id: String,
    pub generated_at: DateTime<Utc>,
    pub is_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.299), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.699), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.7), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_is_monotone() {
        let mut previous = RiskLevel::Low;
        for step in 0..=100 {
            let level = RiskLevel::from_probability(step as f64 / 100.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_risk_level_parse() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(RiskLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(RiskLevel::parse("low"), None);
        assert_eq!(RiskLevel::parse("Severe"), None);
    }

    #[test]
    fn test_time_attached_only_when_actionable() {
        let quiet = RiskAssessment::with_estimate(0.3, 45.0);
        assert_eq!(quiet.time_to_event_minutes, None);

        let actionable = RiskAssessment::with_estimate(0.31, 45.0);
        assert_eq!(actionable.time_to_event_minutes, Some(45.0));
        assert_eq!(actionable.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_negative_estimate_reported_as_zero() {
        let ongoing = RiskAssessment::with_estimate(0.9, -12.0);
        assert_eq!(ongoing.time_to_event_minutes, Some(0.0));
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(RiskAssessment::from_probability(1.4).probability, 1.0);
        assert_eq!(RiskAssessment::from_probability(-0.2).probability, 0.0);
    }
}
