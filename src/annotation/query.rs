//! Lookups over a run's annotations and JSON reading/writing.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::annotation::record::FrameAnnotation;
use crate::error::TrackingError;

/// Keep only records of class `label`.
///
/// The result stays index-aligned with `frames`: frames without a match become empty.
pub fn filter_by_class(frames: &[FrameAnnotation], label: &str) -> Vec<FrameAnnotation> {
    frames
        .iter()
        .map(|frame| {
            FrameAnnotation::from(
                frame
                    .iter()
                    .filter(|record| record.class == label)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Keep only records whose object id equals `object_id`, index-aligned with `frames`.
pub fn filter_by_object_id(frames: &[FrameAnnotation], object_id: &str) -> Vec<FrameAnnotation> {
    frames
        .iter()
        .map(|frame| {
            FrameAnnotation::from(
                frame
                    .iter()
                    .filter(|record| record.object_id == object_id)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Position of `object_id` within `frame`.
pub fn object_index_in_frame(frame: &FrameAnnotation, object_id: &str) -> Option<usize> {
    frame.iter().position(|record| record.object_id == object_id)
}

/// Every object id in frame order, then record order. Repeats are kept.
pub fn object_ids(frames: &[FrameAnnotation]) -> Vec<String> {
    frames
        .iter()
        .flat_map(|frame| frame.iter().map(|record| record.object_id.clone()))
        .collect()
}

/// Write all frames as a JSON array indented with four spaces.
pub fn write_annotations<W: Write>(
    writer: W,
    frames: &[FrameAnnotation],
) -> Result<(), TrackingError> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    frames.serialize(&mut serializer)?;
    Ok(())
}

/// Same output as [`write_annotations`], collected into a string.
pub fn to_json_string(frames: &[FrameAnnotation]) -> Result<String, TrackingError> {
    let mut buf = Vec::new();
    write_annotations(&mut buf, frames)?;
    Ok(String::from_utf8(buf)?)
}

/// Read frames previously written by [`write_annotations`] or by other producers of
/// the same format.
pub fn read_annotations<R: Read>(reader: R) -> Result<Vec<FrameAnnotation>, TrackingError> {
    Ok(serde_json::from_reader(reader)?)
}
