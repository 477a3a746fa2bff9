use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Channel, TimedSample};
use crate::window::config::{PaddingPolicy, WindowConfig};

const ENABLE_LOGS: bool = true;
const LOG_TAG: &str = "glycemic::window";

use crate::{log_debug, log_warn};

/// Fixed-length, per-channel history, oldest to newest.
///
/// Every channel in [`Channel::ALL`] is present and holds exactly `length` values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureWindow {
    length: usize,
    channels: BTreeMap<Channel, Vec<f64>>,
}

impl FeatureWindow {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &[f64])> {
        self.channels
            .iter()
            .map(|(channel, values)| (*channel, values.as_slice()))
    }
}

/// A real (unpadded) glucose reading, kept for trend analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucosePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Everything downstream stages need from one snapshot.
#[derive(Debug, Clone)]
pub struct WindowOutput {
    pub window: FeatureWindow,
    /// Valid glucose readings in chronological order.
    pub glucose: Vec<GlucosePoint>,
    /// Number of samples dropped as malformed.
    pub dropped: usize,
}

impl WindowOutput {
    /// Most recent real glucose value, if any reading was recorded.
    pub fn latest_glucose(&self) -> Option<f64> {
        self.glucose.last().map(|point| point.value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WindowBuilder {
    config: WindowConfig,
}

impl WindowBuilder {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Bucket `samples` per channel and normalize every bucket to the window
    /// length. Never fails; malformed samples are dropped.
    pub fn build(&self, samples: &[TimedSample]) -> WindowOutput {
        let mut buckets: BTreeMap<Channel, Vec<&TimedSample>> = BTreeMap::new();
        let mut dropped = 0;

        for sample in samples {
            if let Err(err) = sample.validate() {
                log_debug!("dropping malformed sample: {err}");
                dropped += 1;
                continue;
            }
            buckets.entry(sample.channel).or_default().push(sample);
        }

        if dropped > 0 {
            log_warn!("dropped {} of {} samples before windowing", dropped, samples.len());
        }

        // Stable sort keeps entry order for identical timestamps.
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|sample| sample.timestamp);
        }

        let channels = Channel::ALL
            .iter()
            .map(|&channel| {
                let values: Vec<f64> = buckets
                    .get(&channel)
                    .map(|bucket| bucket.iter().map(|sample| sample.value).collect())
                    .unwrap_or_default();
                (channel, normalize_channel(&values, channel, &self.config))
            })
            .collect();

        let glucose = buckets
            .get(&Channel::Glucose)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|sample| GlucosePoint {
                        timestamp: sample.timestamp,
                        value: sample.value,
                    })
                    .collect()
            })
            .unwrap_or_default();

        WindowOutput {
            window: FeatureWindow {
                length: self.config.length,
                channels,
            },
            glucose,
            dropped,
        }
    }
}

/// Fit one channel's chronological values to exactly `config.length` slots.
pub fn normalize_channel(values: &[f64], channel: Channel, config: &WindowConfig) -> Vec<f64> {
    let length = config.length;
    if values.is_empty() {
        return vec![channel.default_value(); length];
    }

    let start = values.len().saturating_sub(length);
    let mut normalized = values[start..].to_vec();

    let pad = match config.padding {
        PaddingPolicy::RepeatLast => normalized
            .last()
            .copied()
            .unwrap_or_else(|| channel.default_value()),
        PaddingPolicy::Zero => 0.0,
        PaddingPolicy::ChannelDefault => channel.default_value(),
    };
    normalized.resize(length, pad);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn config(length: usize, padding: PaddingPolicy) -> WindowConfig {
        WindowConfig { length, padding }
    }

    #[test]
    fn test_empty_input_is_default_filled() {
        let output = WindowBuilder::default().build(&[]);

        assert_eq!(output.window.length(), 12);
        for channel in Channel::ALL {
            let values = output.window.channel(channel);
            assert_eq!(values.len(), 12);
            assert!(values.iter().all(|&v| v == channel.default_value()));
        }
        assert_eq!(output.latest_glucose(), None);
        assert_eq!(output.dropped, 0);
    }

    #[test]
    fn test_repeat_last_padding() {
        let padded = normalize_channel(
            &[5.0, 8.0],
            Channel::Meal,
            &config(5, PaddingPolicy::RepeatLast),
        );
        assert_eq!(padded, vec![5.0, 8.0, 8.0, 8.0, 8.0]);
    }

    #[test]
    fn test_zero_and_default_padding() {
        let zero = normalize_channel(&[72.0], Channel::HeartRate, &config(3, PaddingPolicy::Zero));
        assert_eq!(zero, vec![72.0, 0.0, 0.0]);

        let default = normalize_channel(
            &[72.0],
            Channel::HeartRate,
            &config(3, PaddingPolicy::ChannelDefault),
        );
        assert_eq!(default, vec![72.0, 70.0, 70.0]);

        // empty buckets use the channel default whatever the policy
        let empty = normalize_channel(&[], Channel::HeartRate, &config(2, PaddingPolicy::Zero));
        assert_eq!(empty, vec![70.0, 70.0]);
    }

    #[test]
    fn test_keeps_most_recent_values() {
        let values: Vec<f64> = (1..=15).map(|v| v as f64).collect();
        let window = normalize_channel(
            &values,
            Channel::Glucose,
            &config(12, PaddingPolicy::RepeatLast),
        );
        assert_eq!(window.len(), 12);
        assert_eq!(window[0], 4.0);
        assert_eq!(window[11], 15.0);
    }

    #[test]
    fn test_buckets_sorted_chronologically() {
        let samples = vec![
            TimedSample::new(Channel::Glucose, 140.0, at(10)),
            TimedSample::new(Channel::InsulinBolus, 3.0, at(2)),
            TimedSample::new(Channel::Glucose, 120.0, at(0)),
            TimedSample::new(Channel::Glucose, 130.0, at(5)),
        ];
        let output = WindowBuilder::new(config(4, PaddingPolicy::RepeatLast)).build(&samples);

        assert_eq!(
            output.window.channel(Channel::Glucose),
            &[120.0, 130.0, 140.0, 140.0]
        );
        assert_eq!(output.window.channel(Channel::InsulinBolus), &[3.0; 4]);
        assert_eq!(output.window.channel(Channel::InsulinBasal), &[0.0; 4]);
        assert_eq!(output.latest_glucose(), Some(140.0));
        assert_eq!(output.glucose.len(), 3);
        assert_eq!(output.glucose[0].timestamp, at(0));
    }

    #[test]
    fn test_malformed_samples_dropped() {
        crate::utils::logging::init_test_logger();

        let samples = vec![
            TimedSample::new(Channel::Glucose, 110.0, at(0)),
            TimedSample::new(Channel::Glucose, f64::INFINITY, at(5)),
            TimedSample::new(Channel::Meal, -40.0, at(6)),
        ];
        let output = WindowBuilder::new(config(3, PaddingPolicy::RepeatLast)).build(&samples);

        assert_eq!(output.dropped, 2);
        assert_eq!(output.window.channel(Channel::Glucose), &[110.0; 3]);
        assert_eq!(output.window.channel(Channel::Meal), &[0.0; 3]);
    }

    #[test]
    fn test_every_channel_has_window_length() {
        let samples: Vec<TimedSample> = (0..20)
            .map(|i| TimedSample::new(Channel::ALL[i % 7], 80.0 + i as f64, at(i as i64)))
            .collect();
        let output = WindowBuilder::new(config(13, PaddingPolicy::RepeatLast)).build(&samples);

        assert_eq!(output.window.iter().count(), Channel::ALL.len());
        for (_, values) in output.window.iter() {
            assert_eq!(values.len(), 13);
        }
    }
}
