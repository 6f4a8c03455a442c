use serde::{Deserialize, Serialize};

/// Display colour of an annotation, keyed by channel letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoursRecord {
    #[serde(rename = "B")]
    pub b: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "R")]
    pub r: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBoxRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// One identity-tagged detection as stored in annotation files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(rename = "class")]
    pub class: String,
    /// Two-decimal confidence rendered as text, e.g. `"0.86"`
    pub confidence: String,
    /// Track id rendered as text
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub colours: ColoursRecord,
    pub bounding_box: BoundingBoxRecord,
}

/// All annotation records of one frame, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameAnnotation {
    pub records: Vec<AnnotationRecord>,
}

impl FrameAnnotation {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationRecord> {
        self.records.iter()
    }
}

impl From<Vec<AnnotationRecord>> for FrameAnnotation {
    fn from(records: Vec<AnnotationRecord>) -> Self {
        Self { records }
    }
}
