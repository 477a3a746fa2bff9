pub mod prediction;
pub mod sample;

pub use prediction::{PredictionResult, RiskAssessment, RiskLevel};
pub use sample::{Channel, SampleError, TimedSample};
