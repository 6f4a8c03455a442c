use crate::annotation::record::{
    AnnotationRecord, BoundingBoxRecord, ColoursRecord, FrameAnnotation,
};
use crate::tracker::TrackedDetection;

impl From<&TrackedDetection> for AnnotationRecord {
    fn from(tracked: &TrackedDetection) -> Self {
        let detection = &tracked.detection;
        let [x1, y1, x2, y2] = detection.bbox.to_tlbr();
        Self {
            class: detection.class_label.clone(),
            confidence: detection.confidence_label(),
            object_id: tracked.track_id.to_string(),
            colours: ColoursRecord {
                b: detection.display_color.b,
                g: detection.display_color.g,
                r: detection.display_color.r,
            },
            bounding_box: BoundingBoxRecord { x1, y1, x2, y2 },
        }
    }
}

/// Build the frame's annotation records, one per tracked detection, in order.
pub fn emit(tracked: &[TrackedDetection]) -> FrameAnnotation {
    FrameAnnotation {
        records: tracked.iter().map(AnnotationRecord::from).collect(),
    }
}
