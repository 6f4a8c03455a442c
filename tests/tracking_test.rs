use std::collections::HashSet;

use colortrack_rs::tracker::{delta_e_2000, iou_percent};
use colortrack_rs::{
    BBox, Bgr, ClassTable, Detection, FrameAssociator, Lab, RawDetection, TrackedDetection,
    TrackerConfig, TrackingWorker, emit,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn det(label: &str, bbox: BBox, color: Lab) -> Detection {
    Detection::new(0, label, 0.9, bbox, color, Bgr::new(0, 0, 255))
}

fn ids(tracked: &[TrackedDetection]) -> Vec<u64> {
    tracked.iter().map(|t| t.track_id).collect()
}

const GREY: Lab = Lab {
    l: 50.0,
    a: 0.0,
    b: 0.0,
};

#[test]
fn test_continuation() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());

    // Frame 1: one person
    let frame1 = tracker.update(vec![det("person", BBox::new(100, 100, 200, 300), GREY)]);
    assert_eq!(ids(&frame1), vec![0]);

    // Frame 2: same person shifted by 5px, colour within tolerance
    let shifted = Lab::new(51.0, 1.0, -1.0);
    assert!(delta_e_2000(&shifted, &GREY) <= 10.0);
    let frame2 = tracker.update(vec![det("person", BBox::new(105, 100, 205, 300), shifted)]);
    assert_eq!(ids(&frame2), vec![0]);
    assert_eq!(tracker.registry().next_id(), 1);
}

#[test]
fn test_spawn_after_empty_first_frame() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    assert!(tracker.update(vec![]).is_empty());

    let frame2 = tracker.update(vec![det("car", BBox::new(10, 10, 60, 40), GREY)]);
    assert_eq!(ids(&frame2), vec![0]);
}

#[test]
fn test_disappearance_and_reappearance() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    tracker.update(vec![det("backpack", BBox::new(50, 50, 80, 90), GREY)]);

    // Frame 2: nothing matches the backpack
    let frame2 = tracker.update(vec![det("person", BBox::new(300, 100, 350, 250), GREY)]);
    assert_eq!(ids(&frame2), vec![1]);
    assert_eq!(tracker.registry().disappeared_len(), 1);

    // Frame 3: backpack somewhere else with a close colour
    let close = Lab::new(54.0, 0.0, 0.0);
    assert!(delta_e_2000(&close, &GREY) <= 5.0);
    let frame3 = tracker.update(vec![
        det("person", BBox::new(302, 100, 352, 250), GREY),
        det("backpack", BBox::new(500, 400, 530, 440), close),
    ]);
    assert_eq!(ids(&frame3), vec![1, 0]);
    assert_eq!(tracker.registry().disappeared_len(), 0);
}

#[test]
fn test_no_reappearance_beyond_colour_bound() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    tracker.update(vec![det("backpack", BBox::new(50, 50, 80, 90), GREY)]);
    tracker.update(vec![]);

    let far = Lab::new(56.2, 0.0, 0.0);
    let distance = delta_e_2000(&far, &GREY);
    assert!(distance > 5.0 && distance < 6.5);

    let frame3 = tracker.update(vec![det("backpack", BBox::new(500, 400, 530, 440), far)]);
    assert_eq!(ids(&frame3), vec![1]);
    // Track 0 is still waiting.
    assert_eq!(tracker.registry().disappeared_len(), 1);
    assert_eq!(tracker.registry().disappeared_tracks()[0].track_id, 0);
}

#[test]
fn test_reappearance_at_configured_colour_bound() {
    init_logger();
    let close = Lab::new(53.0, 1.5, -2.0);
    let bound = delta_e_2000(&close, &GREY);
    let config = TrackerConfig {
        max_reappearance_color_distance: bound,
        ..TrackerConfig::default()
    };
    let mut tracker = FrameAssociator::new(config);
    tracker.update(vec![det("backpack", BBox::new(50, 50, 80, 90), GREY)]);
    tracker.update(vec![]);

    let frame3 = tracker.update(vec![det("backpack", BBox::new(500, 400, 530, 440), close)]);
    assert_eq!(ids(&frame3), vec![0]);
    assert_eq!(tracker.registry().disappeared_len(), 0);
}

fn scripted_frames() -> Vec<Vec<Detection>> {
    let red = Lab::new(53.2, 80.1, 67.2);
    let blue = Lab::new(29.6, 68.3, -112.0);
    (0..12)
        .map(|step| {
            let mut frame = Vec::new();
            let walker = BBox::new(100 + step * 4, 100, 160 + step * 4, 260);
            if step % 4 != 2 {
                frame.push(det("person", walker, GREY));
            }
            if step % 3 != 1 {
                frame.push(det("car", BBox::new(400 - step * 6, 300, 520 - step * 6, 380), red));
            }
            if step >= 5 {
                frame.push(det("car", BBox::new(400 - step * 6, 300, 520 - step * 6, 380), blue));
            }
            if step % 5 == 0 {
                frame.push(det("person", walker, GREY));
            }
            frame
        })
        .collect()
}

#[test]
fn test_determinism() {
    init_logger();
    let run = || {
        let mut tracker = FrameAssociator::new(TrackerConfig::default());
        scripted_frames()
            .into_iter()
            .map(|frame| ids(&tracker.update(frame)))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_ids_monotonic_and_single_match() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    let mut highest: Option<u64> = None;

    for frame in scripted_frames() {
        let before = tracker.registry().next_id();
        let n = frame.len();
        let out = tracker.update(frame);
        assert_eq!(out.len(), n);

        // No id claims two detections in one frame.
        let unique: HashSet<u64> = out.iter().map(|t| t.track_id).collect();
        assert_eq!(unique.len(), n);

        // Fresh ids come strictly after every id handed out before.
        for id in ids(&out) {
            if id >= before {
                assert!(highest.is_none_or(|h| id > h));
            }
        }
        if let Some(max) = out.iter().map(|t| t.track_id).max() {
            highest = Some(highest.map_or(max, |h| h.max(max)));
        }
        assert!(tracker.registry().next_id() >= before);
    }
}

#[test]
fn test_iou_reference_value() {
    let iou = iou_percent(&BBox::new(0, 0, 100, 100), &BBox::new(50, 50, 150, 150));
    assert!((iou - 14.29).abs() < 0.01);
}

#[test]
fn test_emitted_annotations_align_with_detections() {
    init_logger();
    let mut tracker = FrameAssociator::new(TrackerConfig::default());
    let frames = scripted_frames();
    for frame in frames {
        let n = frame.len();
        let tracked = tracker.update(frame);
        let annotation = emit(&tracked);
        assert_eq!(annotation.len(), n);
        for (record, tracked) in annotation.iter().zip(&tracked) {
            assert_eq!(record.object_id, tracked.track_id.to_string());
            assert_eq!(record.class, tracked.detection.class_label);
        }
    }
}

#[test]
fn test_worker_end_to_end() {
    init_logger();
    let classes = ClassTable::new(
        ["person", "backpack"],
        [Bgr::new(255, 0, 0), Bgr::new(0, 255, 255)],
    )
    .unwrap();
    let worker = TrackingWorker::spawn(TrackerConfig::default(), classes, 4).unwrap();

    let beige = [200.0, 180.0, 140.0];
    worker
        .submit(vec![RawDetection::new(1, 0.81, [40.0, 40.0, 80.0, 90.0], beige)])
        .unwrap();
    worker.submit(vec![]).unwrap();
    worker
        .submit(vec![
            RawDetection::new(0, 0.95, [300.0, 50.0, 360.0, 250.0], [20.0, 20.0, 90.0]),
            RawDetection::new(1, 0.77, [600.0, 400.0, 640.0, 450.0], beige),
            RawDetection::new(1, 0.6, [f32::INFINITY, 0.0, 1.0, 1.0], beige),
        ])
        .unwrap();

    let outputs = worker.finish().unwrap();
    assert_eq!(outputs.len(), 3);
    assert!(outputs[1].annotation.is_empty());

    let frame3 = &outputs[2];
    assert_eq!(frame3.rejected.len(), 1);
    assert_eq!(frame3.rejected[0].index, 2);
    let object_ids: Vec<&str> = frame3
        .annotation
        .iter()
        .map(|r| r.object_id.as_str())
        .collect();
    // The backpack is re-identified by colour; the person is new.
    assert_eq!(object_ids, vec!["1", "0"]);
    assert_eq!(frame3.annotation.records[1].confidence, "0.77");
    assert_eq!(frame3.annotation.records[1].colours.g, 255);
}
