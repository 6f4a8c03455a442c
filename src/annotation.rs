//! Per-frame annotation records handed to persistence and UI layers.
//!
//! The JSON shape written here is the one existing annotation files use, so field names
//! and value encodings (string confidence and object id, BGR colour map) are fixed.

mod emitter;
mod query;
mod record;

pub use emitter::emit;
pub use query::{
    filter_by_class, filter_by_object_id, object_ids, object_index_in_frame, read_annotations,
    to_json_string, write_annotations,
};
pub use record::{AnnotationRecord, BoundingBoxRecord, ColoursRecord, FrameAnnotation};
