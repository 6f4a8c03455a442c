use colortrack_rs::annotation::{
    filter_by_class, filter_by_object_id, object_index_in_frame, read_annotations,
    write_annotations,
};
use colortrack_rs::{
    BBox, Bgr, Detection, FrameAnnotation, FrameAssociator, Lab, TrackerConfig, emit,
};

fn person(score: f32, bbox: BBox) -> Detection {
    Detection::new(0, "person", score, bbox, Lab::new(60.0, 0.0, 0.0), Bgr::new(255, 0, 0))
}

fn car(score: f32, bbox: BBox) -> Detection {
    Detection::new(2, "car", score, bbox, Lab::new(60.0, 0.0, 0.0), Bgr::new(0, 0, 255))
}

fn run() -> Vec<FrameAnnotation> {
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    let frames = vec![
        vec![
            person(0.91, BBox::new(10, 10, 50, 120)),
            car(0.6, BBox::new(200, 80, 320, 150)),
        ],
        vec![car(0.64, BBox::new(195, 80, 315, 150))],
        vec![
            car(0.66, BBox::new(190, 80, 310, 150)),
            person(0.5, BBox::new(12, 10, 52, 120)),
        ],
    ];
    frames
        .into_iter()
        .map(|frame| emit(&tracker.update(frame)))
        .collect()
}

#[test]
fn test_annotations_roundtrip_through_json() {
    let frames = run();

    let mut buf = Vec::new();
    write_annotations(&mut buf, &frames).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("\"objectID\": \"1\""));
    assert!(text.contains("\"confidence\": \"0.5\""));

    let parsed = read_annotations(buf.as_slice()).unwrap();
    assert_eq!(parsed, frames);
}

#[test]
fn test_queries_over_tracked_run() {
    let frames = run();

    let cars = filter_by_class(&frames, "car");
    assert_eq!(cars.len(), 3);
    assert!(cars.iter().all(|f| f.len() == 1 && f.records[0].object_id == "1"));

    // The person disappears in frame 2 and is re-identified in frame 3.
    let person = filter_by_object_id(&frames, "0");
    assert_eq!(person.iter().map(FrameAnnotation::len).collect::<Vec<_>>(), vec![1, 0, 1]);
    assert_eq!(object_index_in_frame(&frames[2], "0"), Some(1));
}
