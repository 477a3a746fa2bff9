//! Short-horizon glycemic risk prediction.
//!
//! Timestamped samples (glucose, insulin, meals, activity, heart rate, skin
//! conductance) are normalized into a fixed-length [`window::FeatureWindow`],
//! scored for hypo- and hyperglycemia risk with an estimated time to event,
//! and summarized in a single advisory line. A remote estimator may take the
//! place of the local rules; whenever it fails, a fallback derived from the
//! current reading is returned instead. Predictions never fail.
//!
//! ```ignore
//! let settings = EngineSettings::load(Path::new("glycemic.json"))?;
//! let engine = PredictionEngine::from_settings(settings)?;
//! let result = engine.predict(&samples, Utc::now()).await;
//! println!("{}", result.recommendation);
//! ```

pub mod analysis;
pub mod engine;
pub mod estimator;
pub mod fallback;
pub mod models;
pub mod recommendation;
pub mod risk;
pub mod settings;
pub mod utils;
pub mod window;

pub use engine::{
    refresh_loop, InMemorySampleSource, PredictionEngine, PredictionSink, RefreshController,
    SampleSource,
};
pub use estimator::{EstimatorError, HttpEstimator, RiskEstimatorClient};
pub use fallback::fallback_prediction;
pub use models::{Channel, PredictionResult, RiskAssessment, RiskLevel, TimedSample};
pub use recommendation::generate_recommendation;
pub use settings::EngineSettings;
pub use window::{FeatureWindow, PaddingPolicy, WindowBuilder, WindowConfig};
