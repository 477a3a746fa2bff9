use crate::models::RiskAssessment;
use crate::risk::config::{
    BASE_PROBABILITY, HYPER_THRESHOLD, HYPER_WATCH_LEVEL, HYPO_WATCH_LEVEL, OPPOSITE_RISK_DAMPING,
};
use crate::risk::trend::{MonotoneRun, Trend};

/// Hypo and hyper assessments for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskPair {
    pub hypo: RiskAssessment,
    pub hyper: RiskAssessment,
}

impl RiskPair {
    /// Both events at the base probability, no times. Used when no glucose is known.
    pub fn baseline() -> Self {
        Self {
            hypo: RiskAssessment::from_probability(BASE_PROBABILITY),
            hyper: RiskAssessment::from_probability(BASE_PROBABILITY),
        }
    }
}

/// Combine the latest glucose value with the recent trend into bounded
/// probabilities. Times are attached later by the event-time stage.
pub fn estimate_risk(latest: f64, trend: &Trend) -> RiskPair {
    let mut hypo = BASE_PROBABILITY;
    let mut hyper = BASE_PROBABILITY;

    match trend.run {
        MonotoneRun::Decreasing { avg_step } => {
            // steeper drop and lower value both push towards hypo; no push above 100
            hypo += (avg_step / 10.0) * (1.0 - latest / 100.0).max(0.0);
            hyper *= OPPOSITE_RISK_DAMPING;
        }
        MonotoneRun::Increasing { avg_step } => {
            hyper += (avg_step / 10.0) * (latest / HYPER_THRESHOLD);
            hypo *= OPPOSITE_RISK_DAMPING;
        }
        MonotoneRun::None => {}
    }

    if latest < HYPO_WATCH_LEVEL {
        hypo += (HYPO_WATCH_LEVEL - latest) / 30.0;
    }
    if latest > HYPER_WATCH_LEVEL {
        hyper += (latest - HYPER_WATCH_LEVEL) / 60.0;
    }

    RiskPair {
        hypo: RiskAssessment::from_probability(hypo),
        hyper: RiskAssessment::from_probability(hyper),
    }
}
