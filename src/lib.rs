//! Frame-to-frame identity tracking for object detections.
//!
//! Detections produced independently for every frame are linked into tracks by a
//! greedy, order-dependent matcher that combines class label, centroid distance,
//! box overlap and CIEDE2000 colour distance.

pub mod annotation;
pub mod error;
pub mod integration;
pub mod tracker;

pub use annotation::{AnnotationRecord, FrameAnnotation, emit};
pub use error::{ConfigError, DetectionError, TrackingError};
pub use integration::{
    ClassTable, DetectionBuilder, DetectionSource, FrameOutput, RawDetection, RejectedDetection,
    TrackerPipeline, TrackingWorker,
};
pub use tracker::{
    BBox, Bgr, Detection, FrameAssociator, Lab, Rgb, Track, TrackRegistry, TrackState,
    TrackedDetection, TrackerConfig,
};
