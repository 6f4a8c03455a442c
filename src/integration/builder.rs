//! Builder for turning detector output into validated `Detection` records.

use log::warn;

use crate::error::DetectionError;
use crate::integration::{ClassTable, RawDetection};
use crate::tracker::{BBox, Detection, Rgb, to_lab};

/// A detection dropped from its frame, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedDetection {
    /// Position of the detection in the detector's batch
    pub index: usize,
    pub error: DetectionError,
}

/// Builder for creating `Detection` objects from detector output.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    class_index: Option<usize>,
    score: Option<f32>,
    tlbr: Option<[f32; 4]>,
    rgb: Option<[f32; 3]>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete detector output.
    pub fn from_raw(raw: &RawDetection) -> Self {
        Self::new()
            .class_index(raw.class_index)
            .score(raw.score)
            .tlbr(raw.bbox[0], raw.bbox[1], raw.bbox[2], raw.bbox[3])
            .rgb(raw.rgb[0], raw.rgb[1], raw.rgb[2])
    }

    pub fn class_index(mut self, class_index: usize) -> Self {
        self.class_index = Some(class_index);
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.tlbr = Some([x1, y1, x2, y2]);
        self
    }

    /// Set the average colour sampled from the detected region.
    pub fn rgb(mut self, r: f32, g: f32, b: f32) -> Self {
        self.rgb = Some([r, g, b]);
        self
    }

    /// Validate the fields and build the final `Detection`.
    ///
    /// Box corners are truncated to whole pixels; the sampled colour is converted to Lab
    /// here, and the display colour is looked up from `classes`.
    pub fn build(self, classes: &ClassTable) -> Result<Detection, DetectionError> {
        let class_index = self
            .class_index
            .ok_or(DetectionError::MissingField("class index"))?;
        let score = self.score.ok_or(DetectionError::MissingField("score"))?;
        let tlbr = self.tlbr.ok_or(DetectionError::MissingField("bounding box"))?;
        let rgb = self.rgb.ok_or(DetectionError::MissingField("colour"))?;

        let (label, display_color) = match (classes.label(class_index), classes.colour(class_index))
        {
            (Some(label), Some(colour)) => (label, colour),
            _ => {
                return Err(DetectionError::UnknownClass {
                    index: class_index,
                    known: classes.len(),
                });
            }
        };

        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(DetectionError::InvalidConfidence(score));
        }

        if tlbr.iter().any(|v| !v.is_finite()) {
            return Err(DetectionError::NonFiniteCoordinate);
        }
        let bbox = BBox::new(
            tlbr[0] as i32,
            tlbr[1] as i32,
            tlbr[2] as i32,
            tlbr[3] as i32,
        );
        if bbox.is_degenerate() {
            return Err(DetectionError::DegenerateBox {
                x1: bbox.x1,
                y1: bbox.y1,
                x2: bbox.x2,
                y2: bbox.y2,
            });
        }

        if rgb.iter().any(|c| !c.is_finite() || !(0.0..=255.0).contains(c)) {
            return Err(DetectionError::InvalidColour(rgb));
        }
        let color = to_lab(Rgb::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64));

        Ok(Detection::new(
            class_index,
            label,
            score,
            bbox,
            color,
            display_color,
        ))
    }
}

/// Build one frame's detections, dropping and reporting malformed ones.
pub fn build_batch(
    raw: &[RawDetection],
    classes: &ClassTable,
) -> (Vec<Detection>, Vec<RejectedDetection>) {
    let mut detections = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();
    for (index, raw_det) in raw.iter().enumerate() {
        match DetectionBuilder::from_raw(raw_det).build(classes) {
            Ok(detection) => detections.push(detection),
            Err(error) => {
                warn!("dropping detection {}: {}", index, error);
                rejected.push(RejectedDetection { index, error });
            }
        }
    }
    (detections, rejected)
}
