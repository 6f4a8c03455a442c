//! Integration module for connecting object detectors with the tracker.
//!
//! This module provides the detector boundary, the conversion of raw detector output
//! into validated detections, and drivers that run tracking frame by frame either
//! inline or on a dedicated thread.

mod builder;
mod classes;
mod detector;
mod pipeline;
mod worker;

pub use builder::{DetectionBuilder, RejectedDetection, build_batch};
pub use classes::ClassTable;
pub use detector::{DetectionSource, RawDetection};
pub use pipeline::{FrameOutput, TrackerPipeline};
pub use worker::TrackingWorker;
