//! Matching utilities for frame-to-frame association.

use ndarray::{Array2, ArrayView1};

use crate::tracker::color::{Bgr, Lab, delta_e_2000};
use crate::tracker::frame_associator::TrackerConfig;
use crate::tracker::rect::{BBox, centroid_distance, iou_percent_batch};

/// One object observed in one frame, before identity assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Index into the detector's class tables
    pub class_index: usize,
    /// Human readable class name
    pub class_label: String,
    /// Detection confidence, rounded to two decimals
    pub confidence: f64,
    /// Bounding box corners
    pub bbox: BBox,
    /// Centre of `bbox`, computed once on construction
    pub centroid: (i32, i32),
    /// Lab conversion of the sampled region colour
    pub color: Lab,
    /// Class palette colour for rendering
    pub display_color: Bgr,
}

impl Detection {
    pub fn new(
        class_index: usize,
        class_label: impl Into<String>,
        score: f32,
        bbox: BBox,
        color: Lab,
        display_color: Bgr,
    ) -> Self {
        Self {
            class_index,
            class_label: class_label.into(),
            confidence: round_confidence(score),
            centroid: bbox.center(),
            bbox,
            color,
            display_color,
        }
    }

    /// Confidence as the annotation files store it (`0.9`, `0.86`, `1.0`).
    pub fn confidence_label(&self) -> String {
        if self.confidence.fract() == 0.0 {
            format!("{:.1}", self.confidence)
        } else {
            format!("{}", self.confidence)
        }
    }
}

/// Round a raw detector score to two decimals.
#[inline]
pub fn round_confidence(score: f32) -> f64 {
    (score as f64 * 100.0).round() / 100.0
}

/// Whether `candidate` continues the track last seen as `anchor`.
///
/// Requires the same class, spatial continuity (centroid shift or box overlap) and a
/// colour within the continuation bound.
pub fn continues(anchor: &Detection, candidate: &Detection, config: &TrackerConfig) -> bool {
    anchor.class_label == candidate.class_label
        && (centroid_distance(candidate.centroid, anchor.centroid) < config.max_centroid_distance
            || candidate.bbox.iou_percent(&anchor.bbox) > config.min_iou_percent)
        && delta_e_2000(&candidate.color, &anchor.color) <= config.max_continuation_color_distance
}

/// Whether `candidate` re-identifies a disappeared track last seen as `anchor`.
///
/// Spatial continuity is not required: only class and the tighter colour bound count.
pub fn reappears(anchor: &Detection, candidate: &Detection, config: &TrackerConfig) -> bool {
    anchor.class_label == candidate.class_label
        && delta_e_2000(&candidate.color, &anchor.color) <= config.max_reappearance_color_distance
}

/// Continuation gate matrix of shape (tracks, detections).
pub fn continuation_gates(
    anchors: &[&Detection],
    detections: &[Detection],
    config: &TrackerConfig,
) -> Array2<bool> {
    let anchor_boxes: Vec<BBox> = anchors.iter().map(|d| d.bbox).collect();
    let det_boxes: Vec<BBox> = detections.iter().map(|d| d.bbox).collect();
    let ious = iou_percent_batch(&anchor_boxes, &det_boxes);

    Array2::from_shape_fn((anchors.len(), detections.len()), |(i, j)| {
        let anchor = anchors[i];
        let candidate = &detections[j];
        anchor.class_label == candidate.class_label
            && (centroid_distance(candidate.centroid, anchor.centroid)
                < config.max_centroid_distance
                || ious[[i, j]] > config.min_iou_percent)
            && delta_e_2000(&candidate.color, &anchor.color)
                <= config.max_continuation_color_distance
    })
}

/// Reappearance gate matrix of shape (tracks, detections).
pub fn reappearance_gates(
    anchors: &[&Detection],
    detections: &[Detection],
    config: &TrackerConfig,
) -> Array2<bool> {
    Array2::from_shape_fn((anchors.len(), detections.len()), |(i, j)| {
        reappears(anchors[i], &detections[j], config)
    })
}

/// Position in `pool` of the first detection whose gate is open.
///
/// `pool` holds detection indices in arrival order; the first hit wins even if a later
/// detection would be a closer match.
#[inline]
pub fn first_match(pool: &[usize], gates: ArrayView1<'_, bool>) -> Option<usize> {
    pool.iter().position(|&det_idx| gates[det_idx])
}
