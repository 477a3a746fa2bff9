pub mod pipeline;
pub mod refresh;
pub mod source;

pub use pipeline::PredictionEngine;
pub use refresh::{refresh_loop, RefreshController};
pub use source::{InMemorySampleSource, PredictionSink, SampleSource};
