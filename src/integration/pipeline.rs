//! TrackerPipeline for combining detection with tracking.

use crate::annotation::{FrameAnnotation, emit};
use crate::integration::builder::{RejectedDetection, build_batch};
use crate::integration::{ClassTable, RawDetection};
use crate::tracker::{FrameAssociator, TrackedDetection, TrackerConfig};

use super::DetectionSource;

/// Result of tracking one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Zero-based position of the frame in the processed sequence
    pub frame_index: usize,
    /// Identity-tagged detections, in detector order
    pub tracked: Vec<TrackedDetection>,
    /// Records for persistence and display
    pub annotation: FrameAnnotation,
    /// Detections dropped as malformed
    pub rejected: Vec<RejectedDetection>,
}

/// Build, associate and emit one batch of raw detections.
pub(crate) fn track_batch(
    associator: &mut FrameAssociator,
    classes: &ClassTable,
    raw: &[RawDetection],
) -> FrameOutput {
    let frame_index = associator.frame_id() as usize;
    let (detections, rejected) = build_batch(raw, classes);
    let tracked = associator.update(detections);
    let annotation = emit(&tracked);
    FrameOutput {
        frame_index,
        tracked,
        annotation,
        rejected,
    }
}

/// A combined tracker that bundles detection inference with association.
///
/// This struct provides a convenient way to run end-to-end tracking
/// by combining any `DetectionSource` with the `FrameAssociator`.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: FrameAssociator,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Self {
        Self {
            detector,
            tracker: FrameAssociator::new(config),
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, TrackerConfig::default())
    }

    /// Process a single frame.
    ///
    /// This method runs detection on the input image and then associates the
    /// detected objects with existing tracks.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The frame's tracking output, or a detection error. A detector error leaves the
    /// tracker untouched, so the frame may be retried or skipped.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameOutput, D::Error> {
        let raw = self.detector.detect(input, width, height)?;
        Ok(track_batch(
            &mut self.tracker,
            self.detector.class_table(),
            &raw,
        ))
    }

    /// Process frames in order until the iterator is exhausted.
    ///
    /// Each item is `(bytes, width, height)`. Stops at the first detector error.
    pub fn run<'a, I>(&mut self, frames: I) -> Result<Vec<FrameOutput>, D::Error>
    where
        I: IntoIterator<Item = (&'a [u8], u32, u32)>,
    {
        frames
            .into_iter()
            .map(|(input, width, height)| self.process_frame(input, width, height))
            .collect()
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &FrameAssociator {
        &self.tracker
    }
}
