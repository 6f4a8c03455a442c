//! A persistent object identity.

use crate::tracker::matching::Detection;
use crate::tracker::track_state::TrackState;

/// Single object track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier, never reused
    pub track_id: u64,
    /// Current lifecycle state
    pub state: TrackState,
    /// Most recent detection matched to this identity
    pub last_detection: Detection,
    /// Frame in which the track was created
    pub start_frame: u32,
    /// Last frame in which a detection was matched
    pub frame_id: u32,
    /// Number of frames with a matched detection
    pub hits: u32,
}

impl Track {
    /// Create an active track from its first detection.
    pub fn new(track_id: u64, detection: Detection, frame_id: u32) -> Self {
        Self {
            track_id,
            state: TrackState::Active,
            last_detection: detection,
            start_frame: frame_id,
            frame_id,
            hits: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == TrackState::Active
    }

    /// Frames elapsed since the last matched detection.
    pub fn frames_since_seen(&self, frame_id: u32) -> u32 {
        frame_id.saturating_sub(self.frame_id)
    }

    pub fn update(&mut self, detection: Detection, frame_id: u32) {
        self.last_detection = detection;
        self.frame_id = frame_id;
        self.hits += 1;
        self.state = TrackState::Active;
    }

    pub fn mark_disappeared(&mut self) {
        self.state = TrackState::Disappeared;
    }
}
