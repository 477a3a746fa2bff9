//! Descriptive helpers over glucose values and window sequences.

use serde::{Deserialize, Serialize};

use crate::risk::config::{HYPER_THRESHOLD, HYPO_THRESHOLD};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GlucoseStatus {
    Low,
    Normal,
    High,
}

impl GlucoseStatus {
    pub fn classify(value: f64) -> Self {
        if value < HYPO_THRESHOLD {
            GlucoseStatus::Low
        } else if value > HYPER_THRESHOLD {
            GlucoseStatus::High
        } else {
            GlucoseStatus::Normal
        }
    }
}

/// Percentage of readings within `[low, high]`, rounded to a whole number.
pub fn time_in_range(values: &[f64], low: f64, high: f64) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let in_range = values.iter().filter(|&&v| v >= low && v <= high).count();
    ((in_range as f64 / values.len() as f64) * 100.0).round() as u8
}

/// Active insulin per slot of a bolus sequence (one slot ~ 5 minutes).
pub fn insulin_on_board(bolus: &[f64]) -> Vec<f64> {
    decayed_accumulation(bolus, 12, |steps| match steps {
        0..=3 => 0.9,
        4..=6 => 0.8,
        _ => 0.7,
    })
}

/// Unabsorbed carbohydrate per slot of a meal sequence.
pub fn carbs_on_board(carbs: &[f64]) -> Vec<f64> {
    decayed_accumulation(carbs, 8, |steps| match steps {
        0..=2 => 0.8,
        3..=4 => 0.5,
        5..=6 => 0.2,
        _ => 0.05,
    })
}

fn decayed_accumulation(series: &[f64], lookback: usize, decay: impl Fn(usize) -> f64) -> Vec<f64> {
    (0..series.len())
        .map(|i| {
            let carried: f64 = (i.saturating_sub(lookback)..i)
                .map(|j| series[j] * decay(i - j))
                .sum();
            series[i] + carried
        })
        .collect()
}
