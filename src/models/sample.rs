//! Timed sample data model.
//!
//! A single recorded event from the timeline collaborator: one value on one
//! channel at one instant. Samples are read-only to the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One physiological or lifestyle signal type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Glucose,
    InsulinBasal,
    InsulinBolus,
    Meal,
    Activity,
    HeartRate,
    SkinConductance,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Glucose,
        Channel::InsulinBasal,
        Channel::InsulinBolus,
        Channel::Meal,
        Channel::Activity,
        Channel::HeartRate,
        Channel::SkinConductance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Glucose => "glucose",
            Channel::InsulinBasal => "insulin_basal",
            Channel::InsulinBolus => "insulin_bolus",
            Channel::Meal => "meal",
            Channel::Activity => "activity",
            Channel::HeartRate => "heart_rate",
            Channel::SkinConductance => "skin_conductance",
        }
    }

    /// Value used to fill a window slot when the channel has no samples at all.
    pub fn default_value(&self) -> f64 {
        match self {
            Channel::Glucose => 120.0,
            Channel::InsulinBasal
            | Channel::InsulinBolus
            | Channel::Meal
            | Channel::Activity => 0.0,
            Channel::HeartRate => 70.0,
            Channel::SkinConductance => 1.0,
        }
    }

    /// Inclusive plausible range for a recorded value.
    pub fn valid_range(&self) -> (f64, f64) {
        match self {
            // mg/dL; meters read roughly 20-600, leave headroom for lab values
            Channel::Glucose => (10.0, 1000.0),
            Channel::HeartRate => (20.0, 250.0),
            _ => (0.0, f64::MAX),
        }
    }
}

/// Why a sample was rejected before windowing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("{channel} sample at {timestamp} is not a finite number")]
    NonFinite {
        channel: &'static str,
        timestamp: DateTime<Utc>,
    },
    #[error("{channel} sample at {timestamp} has value {value} outside [{min}, {max}]")]
    OutOfRange {
        channel: &'static str,
        timestamp: DateTime<Utc>,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A single timestamped event on one channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimedSample {
    pub channel: Channel,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// Free-form qualifier from the entry form (meal type, activity kind, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl TimedSample {
    pub fn new(channel: Channel, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            channel,
            value,
            timestamp,
            subtype: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn validate(&self) -> Result<(), SampleError> {
        if !self.value.is_finite() {
            return Err(SampleError::NonFinite {
                channel: self.channel.as_str(),
                timestamp: self.timestamp,
            });
        }

        let (min, max) = self.channel.valid_range();
        if self.value < min || self.value > max {
            return Err(SampleError::OutOfRange {
                channel: self.channel.as_str(),
                timestamp: self.timestamp,
                value: self.value,
                min,
                max,
            });
        }

        Ok(())
    }
}
