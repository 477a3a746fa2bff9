use std::future::Future;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::models::{PredictionResult, TimedSample};

/// Read-only access to recorded samples.
pub trait SampleSource: Send + Sync {
    /// Samples with `start <= timestamp <= end`, in any order.
    fn samples_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<TimedSample>>> + Send;
}

/// Receives each finished prediction (display, storage, notification).
pub trait PredictionSink: Send {
    fn publish(&self, result: &PredictionResult);
}

impl PredictionSink for watch::Sender<Option<PredictionResult>> {
    fn publish(&self, result: &PredictionResult) {
        self.send_replace(Some(result.clone()));
    }
}

/// A fixed snapshot of samples held in chronological order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleSource {
    samples: Vec<TimedSample>,
}

impl InMemorySampleSource {
    pub fn new(mut samples: Vec<TimedSample>) -> Self {
        samples.sort_by_key(|sample| sample.timestamp);
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for InMemorySampleSource {
    async fn samples_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimedSample>> {
        let first = self.samples.partition_point(|sample| sample.timestamp < start);
        let last = self.samples.partition_point(|sample| sample.timestamp <= end);
        Ok(self.samples[first..last.max(first)].to_vec())
    }
}
