pub mod builder;
pub mod config;

pub use builder::{normalize_channel, FeatureWindow, GlucosePoint, WindowBuilder, WindowOutput};
pub use config::{PaddingPolicy, WindowConfig, DEFAULT_WINDOW_LENGTH};
