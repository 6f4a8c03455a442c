pub mod color;
mod frame_associator;
pub mod matching;
pub mod rect;
mod registry;
mod track;
mod track_state;

pub use color::{Bgr, Lab, Rgb, delta_e_2000, to_lab};
pub use frame_associator::{FrameAssociator, TrackedDetection, TrackerConfig};
pub use matching::Detection;
pub use rect::{BBox, iou_percent};
pub use registry::TrackRegistry;
pub use track::Track;
pub use track_state::TrackState;
