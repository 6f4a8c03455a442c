//! Ownership of every track identity and its lifecycle transitions.

use std::collections::BTreeMap;

use log::trace;

use crate::tracker::matching::Detection;
use crate::tracker::track::Track;

/// Active and disappeared tracks.
///
/// A track id lives in exactly one of the two sets. Active tracks iterate in ascending
/// id order (which is creation order); disappeared tracks keep the order in which they
/// disappeared.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    active: BTreeMap<u64, Track>,
    disappeared: Vec<Track>,
    next_id: u64,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id and store an active track for `detection`.
    pub fn create_track(&mut self, detection: Detection, frame_id: u32) -> u64 {
        let track_id = self.next_id;
        self.next_id += 1;
        trace!("track {} created in frame {}", track_id, frame_id);
        self.active
            .insert(track_id, Track::new(track_id, detection, frame_id));
        track_id
    }

    /// Record `detection` as the latest observation of an active track.
    ///
    /// Returns `false` if `track_id` is not active.
    pub fn mark_continued(&mut self, track_id: u64, detection: Detection, frame_id: u32) -> bool {
        match self.active.get_mut(&track_id) {
            Some(track) => {
                track.update(detection, frame_id);
                true
            }
            None => false,
        }
    }

    /// Move an active track to the disappeared set, keeping its last detection.
    ///
    /// Returns `false` if `track_id` is not active.
    pub fn mark_disappeared(&mut self, track_id: u64) -> bool {
        match self.active.remove(&track_id) {
            Some(mut track) => {
                track.mark_disappeared();
                self.disappeared.push(track);
                true
            }
            None => false,
        }
    }

    /// Bring a disappeared track back under the same id with a new detection.
    ///
    /// Returns `false` if `track_id` is not in the disappeared set.
    pub fn resurrect(&mut self, track_id: u64, detection: Detection, frame_id: u32) -> bool {
        let Some(pos) = self
            .disappeared
            .iter()
            .position(|t| t.track_id == track_id)
        else {
            return false;
        };
        let mut track = self.disappeared.remove(pos);
        track.update(detection, frame_id);
        self.active.insert(track_id, track);
        true
    }

    /// Drop disappeared tracks unmatched for more than `max_frames` frames.
    ///
    /// Returns the ids that were dropped.
    pub fn prune_disappeared(&mut self, frame_id: u32, max_frames: u32) -> Vec<u64> {
        let mut dropped = Vec::new();
        self.disappeared.retain(|track| {
            if track.frames_since_seen(frame_id) > max_frames {
                dropped.push(track.track_id);
                false
            } else {
                true
            }
        });
        dropped
    }

    pub fn get(&self, track_id: u64) -> Option<&Track> {
        self.active
            .get(&track_id)
            .or_else(|| self.disappeared.iter().find(|t| t.track_id == track_id))
    }

    /// Active tracks in ascending id order.
    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        self.active.values()
    }

    pub fn active_ids(&self) -> Vec<u64> {
        self.active.keys().copied().collect()
    }

    /// Disappeared tracks in the order they disappeared.
    pub fn disappeared_tracks(&self) -> &[Track] {
        &self.disappeared
    }

    /// The id the next created track will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn disappeared_len(&self) -> usize {
        self.disappeared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.disappeared.is_empty()
    }
}
