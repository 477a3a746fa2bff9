use crate::models::RiskAssessment;
use crate::risk::config::{HYPER_THRESHOLD, HYPO_THRESHOLD};
use crate::risk::scoring::RiskPair;

/// Rough minutes until each threshold crossing, from the current value alone.
///
/// Values past a threshold give a negative estimate ("already happening");
/// attaching to an assessment reports those as 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTimes {
    pub hypo_minutes: f64,
    pub hyper_minutes: f64,
}

impl EventTimes {
    pub fn from_glucose(value: f64) -> Self {
        Self {
            hypo_minutes: 30.0 + (value - HYPO_THRESHOLD) * 3.0,
            hyper_minutes: 30.0 + (HYPER_THRESHOLD - value) * 2.0,
        }
    }

    /// Quote a time on each assessment whose probability is actionable.
    pub fn attach(&self, pair: RiskPair) -> RiskPair {
        RiskPair {
            hypo: RiskAssessment::with_estimate(pair.hypo.probability, self.hypo_minutes),
            hyper: RiskAssessment::with_estimate(pair.hyper.probability, self.hyper_minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates_from_value() {
        let times = EventTimes::from_glucose(100.0);
        assert_eq!(times.hypo_minutes, 120.0);
        assert_eq!(times.hyper_minutes, 190.0);

        let below = EventTimes::from_glucose(60.0);
        assert_eq!(below.hypo_minutes, 0.0);
        assert_eq!(EventTimes::from_glucose(50.0).hypo_minutes, -30.0);
    }

    #[test]
    fn test_attach_only_when_actionable() {
        let pair = RiskPair {
            hypo: RiskAssessment::from_probability(0.55),
            hyper: RiskAssessment::from_probability(0.3),
        };
        let timed = EventTimes::from_glucose(80.0).attach(pair);

        assert_eq!(timed.hypo.time_to_event_minutes, Some(60.0));
        assert_eq!(timed.hyper.time_to_event_minutes, None);
        assert_eq!(timed.hypo.probability, 0.55);
    }

    #[test]
    fn test_attach_reports_ongoing_event_as_zero() {
        let pair = RiskPair {
            hypo: RiskAssessment::from_probability(1.0),
            hyper: RiskAssessment::from_probability(0.05),
        };
        let timed = EventTimes::from_glucose(55.0).attach(pair);
        assert_eq!(timed.hypo.time_to_event_minutes, Some(0.0));
    }
}
