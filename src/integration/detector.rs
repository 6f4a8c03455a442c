//! Boundary with the external object detector.

use crate::integration::ClassTable;

/// Detector output for one object, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Index into the detector's class tables
    pub class_index: usize,
    /// Confidence score in `[0, 1]`
    pub score: f32,
    /// Box corners in TLBR format (x1, y1, x2, y2)
    pub bbox: [f32; 4],
    /// Average RGB colour sampled from the detected region, channels in `[0, 255]`
    pub rgb: [f32; 3],
}

impl RawDetection {
    pub fn new(class_index: usize, score: f32, bbox: [f32; 4], rgb: [f32; 3]) -> Self {
        Self {
            class_index,
            score,
            bbox,
            rgb,
        }
    }
}

/// Trait for object detection backends.
///
/// Implement this trait to feed any detection model into the tracker.
///
/// # Example
///
/// ```ignore
/// use colortrack_rs::{ClassTable, DetectionSource, RawDetection};
///
/// struct MyDetector {
///     classes: ClassTable,
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<RawDetection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
///
///     fn class_table(&self) -> &ClassTable {
///         &self.classes
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return one frame's detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RawDetection>, Self::Error>;

    /// Class labels and display colours indexed by `RawDetection::class_index`.
    fn class_table(&self) -> &ClassTable;
}
