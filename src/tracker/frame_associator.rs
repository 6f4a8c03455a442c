//! Greedy per-frame association of detections to track identities.

use log::{debug, trace};
use ndarray::s;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracker::matching::{self, Detection};
use crate::tracker::registry::TrackRegistry;

/// Configuration for the [`FrameAssociator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Centroid shift (pixels) below which a detection continues a track
    pub max_centroid_distance: f64,
    /// Box overlap (percent) above which a detection continues a track
    pub min_iou_percent: f64,
    /// CIEDE2000 bound for continuing an active track
    pub max_continuation_color_distance: f64,
    /// CIEDE2000 bound for re-identifying a disappeared track
    pub max_reappearance_color_distance: f64,
    /// Frames a disappeared track is retained; `None` keeps it for the whole run
    pub max_disappeared_frames: Option<u32>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_centroid_distance: 20.0,
            min_iou_percent: 60.0,
            max_continuation_color_distance: 10.0,
            max_reappearance_color_distance: 5.0,
            max_disappeared_frames: None,
        }
    }
}

impl TrackerConfig {
    /// Parse a JSON config; missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("max_centroid_distance", self.max_centroid_distance),
            ("min_iou_percent", self.min_iou_percent),
            (
                "max_continuation_color_distance",
                self.max_continuation_color_distance,
            ),
            (
                "max_reappearance_color_distance",
                self.max_reappearance_color_distance,
            ),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.min_iou_percent > 100.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "min_iou_percent",
                value: self.min_iou_percent,
            });
        }
        Ok(())
    }
}

/// A detection paired with the identity assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedDetection {
    pub detection: Detection,
    pub track_id: u64,
}

/// Links each frame's detections to persistent track ids.
///
/// Frames must be fed in temporal order. Each call to [`update`](Self::update) runs
/// three phases over a shared detection pool, and a detection leaves the pool as soon
/// as it is claimed:
///
/// 1. active tracks, ascending by id, claim the first pooled detection that continues
///    them; tracks that claim nothing move to the disappeared set;
/// 2. disappeared tracks, in the order they disappeared, claim the first pooled
///    detection that re-identifies them;
/// 3. every detection left in the pool starts a new track.
pub struct FrameAssociator {
    registry: TrackRegistry,
    frame_id: u32,
    config: TrackerConfig,
}

impl FrameAssociator {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            registry: TrackRegistry::new(),
            frame_id: 0,
            config,
        }
    }

    /// Number of frames processed so far.
    pub fn frame_id(&self) -> u32 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Associate one frame of detections.
    ///
    /// The returned sequence preserves the input order of `detections`.
    pub fn update(&mut self, detections: Vec<Detection>) -> Vec<TrackedDetection> {
        self.frame_id += 1;

        // Detections are addressed by index so identical records stay distinct.
        let mut assigned: Vec<Option<u64>> = vec![None; detections.len()];
        let mut pool: Vec<usize> = (0..detections.len()).collect();

        let mut continued = 0usize;
        let mut resurrected = 0usize;
        let mut lost = 0usize;

        if self.frame_id > 1 {
            // Step 1: continue active tracks
            let active_ids = self.registry.active_ids();
            let gates = {
                let anchors: Vec<&Detection> = self
                    .registry
                    .active_tracks()
                    .map(|t| &t.last_detection)
                    .collect();
                matching::continuation_gates(&anchors, &detections, &self.config)
            };

            for (row, &track_id) in active_ids.iter().enumerate() {
                match matching::first_match(&pool, gates.slice(s![row, ..])) {
                    Some(pos) => {
                        let det_idx = pool.remove(pos);
                        trace!("track {} continued by detection {}", track_id, det_idx);
                        self.registry.mark_continued(
                            track_id,
                            detections[det_idx].clone(),
                            self.frame_id,
                        );
                        assigned[det_idx] = Some(track_id);
                        continued += 1;
                    }
                    None => {
                        trace!("track {} disappeared", track_id);
                        self.registry.mark_disappeared(track_id);
                        lost += 1;
                    }
                }
            }

            // Step 2: re-identify disappeared tracks
            let disappeared_ids: Vec<u64> = self
                .registry
                .disappeared_tracks()
                .iter()
                .map(|t| t.track_id)
                .collect();
            let gates = {
                let anchors: Vec<&Detection> = self
                    .registry
                    .disappeared_tracks()
                    .iter()
                    .map(|t| &t.last_detection)
                    .collect();
                matching::reappearance_gates(&anchors, &detections, &self.config)
            };

            for (row, &track_id) in disappeared_ids.iter().enumerate() {
                if pool.is_empty() {
                    break;
                }
                if let Some(pos) = matching::first_match(&pool, gates.slice(s![row, ..])) {
                    let det_idx = pool.remove(pos);
                    trace!("track {} resurrected by detection {}", track_id, det_idx);
                    self.registry
                        .resurrect(track_id, detections[det_idx].clone(), self.frame_id);
                    assigned[det_idx] = Some(track_id);
                    resurrected += 1;
                }
            }
        }

        // Step 3: spawn new tracks
        let spawned = pool.len();
        for det_idx in pool {
            let track_id = self
                .registry
                .create_track(detections[det_idx].clone(), self.frame_id);
            assigned[det_idx] = Some(track_id);
        }

        if let Some(max_frames) = self.config.max_disappeared_frames {
            let dropped = self.registry.prune_disappeared(self.frame_id, max_frames);
            if !dropped.is_empty() {
                debug!(
                    "frame {}: dropped {} expired tracks {:?}",
                    self.frame_id,
                    dropped.len(),
                    dropped
                );
            }
        }

        debug!(
            "frame {}: {} detections, {} continued, {} resurrected, {} spawned, {} disappeared, {} pending",
            self.frame_id,
            detections.len(),
            continued,
            resurrected,
            spawned,
            lost,
            self.registry.disappeared_len()
        );

        detections
            .into_iter()
            .zip(assigned)
            .filter_map(|(detection, track_id)| {
                track_id.map(|track_id| TrackedDetection {
                    detection,
                    track_id,
                })
            })
            .collect()
    }
}
