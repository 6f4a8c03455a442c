/// Axis-aligned bounding box in integer pixel corners (TLBR format).
///
/// Detection boxes are validated to satisfy `x1 < x2` and `y1 < y2` when they are built,
/// but the overlap routines below accept any corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BBox {
    /// Top-left x coordinate
    pub x1: i32,
    /// Top-left y coordinate
    pub y1: i32,
    /// Bottom-right x coordinate
    pub x2: i32,
    /// Bottom-right y coordinate
    pub y2: i32,
}

impl BBox {
    /// Create a new box from its top-left and bottom-right corners.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// Integer centre point, truncated toward zero.
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (
            ((self.x1 as i64 + self.x2 as i64) / 2) as i32,
            ((self.y1 as i64 + self.y2 as i64) / 2) as i32,
        )
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// True when the box encloses no pixels.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Intersection over Union with another box, as a percentage in `[0, 100]`.
    pub fn iou_percent(&self, other: &BBox) -> f64 {
        let left = self.x1.max(other.x1);
        let top = self.y1.max(other.y1);
        let right = self.x2.min(other.x2);
        let bottom = self.y2.min(other.y2);

        if left >= right || top >= bottom {
            return 0.0;
        }

        let inter_area = (right as i64 - left as i64) * (bottom as i64 - top as i64);
        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0 {
            100.0 * inter_area as f64 / union_area as f64
        } else {
            0.0
        }
    }
}

/// Intersection over Union between two boxes, as a percentage in `[0, 100]`.
#[inline]
pub fn iou_percent(box1: &BBox, box2: &BBox) -> f64 {
    box1.iou_percent(box2)
}

use ndarray::Array2;

/// Calculate the IoU percentage matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_percent_batch(boxes_a: &[BBox], boxes_b: &[BBox]) -> Array2<f64> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou_percent(b);
        }
    }
    ious
}

/// Euclidean distance between two integer points.
#[inline]
pub fn centroid_distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = (b.0 as i64 - a.0 as i64) as f64;
    let dy = (b.1 as i64 - a.1 as i64) as f64;
    dx.hypot(dy)
}
