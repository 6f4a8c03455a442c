//! Error types shared across the crate.

use thiserror::Error;

/// A single detector output that could not be turned into a [`Detection`].
///
/// These are recoverable: the offending detection is dropped from its frame and the
/// rest of the batch is still tracked.
///
/// [`Detection`]: crate::tracker::Detection
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectionError {
    #[error("detection is missing its {0}")]
    MissingField(&'static str),
    #[error("class index {index} is outside the class table ({known} classes)")]
    UnknownClass { index: usize, known: usize },
    #[error("bounding box has a non-finite corner")]
    NonFiniteCoordinate,
    #[error("degenerate bounding box ({x1}, {y1}, {x2}, {y2})")]
    DegenerateBox { x1: i32, y1: i32, x2: i32, y2: i32 },
    #[error("confidence {0} is outside [0, 1]")]
    InvalidConfidence(f32),
    #[error("sampled colour {0:?} is outside [0, 255]")]
    InvalidColour([f32; 3]),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold `{name}` has invalid value {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("class table has {labels} labels but {colours} colours")]
    TableLengthMismatch { labels: usize, colours: usize },
    #[error("failed to parse tracker config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("failed to spawn tracking thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("tracking worker is no longer accepting frames")]
    WorkerStopped,
    #[error("tracking worker panicked")]
    WorkerPanicked,
    #[error("annotation serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("annotation output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
