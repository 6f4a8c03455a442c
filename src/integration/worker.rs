//! Tracking on a dedicated thread fed through a bounded channel.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, bounded};
use log::info;

use crate::error::TrackingError;
use crate::integration::pipeline::{FrameOutput, track_batch};
use crate::integration::{ClassTable, RawDetection};
use crate::tracker::{FrameAssociator, TrackerConfig};

/// Owns a [`FrameAssociator`] on its own thread.
///
/// Batches are processed strictly in submission order. The channel is bounded, so
/// [`submit`](Self::submit) blocks when the producer runs ahead of tracking by more
/// than `capacity` frames.
pub struct TrackingWorker {
    sender: Sender<Vec<RawDetection>>,
    handle: JoinHandle<Vec<FrameOutput>>,
}

impl TrackingWorker {
    pub fn spawn(
        config: TrackerConfig,
        classes: ClassTable,
        capacity: usize,
    ) -> Result<Self, TrackingError> {
        let (sender, receiver) = bounded::<Vec<RawDetection>>(capacity);

        let handle = thread::Builder::new()
            .name("colortrack-worker".to_string())
            .spawn(move || {
                info!("tracking worker started");
                let mut associator = FrameAssociator::new(config);
                let mut outputs = Vec::new();
                for raw in receiver {
                    outputs.push(track_batch(&mut associator, &classes, &raw));
                }
                info!("tracking worker stopped after {} frames", outputs.len());
                outputs
            })?;

        Ok(Self { sender, handle })
    }

    /// Queue one frame's detections, blocking while the channel is full.
    pub fn submit(&self, batch: Vec<RawDetection>) -> Result<(), TrackingError> {
        self.sender
            .send(batch)
            .map_err(|_| TrackingError::WorkerStopped)
    }

    /// Close the input and wait for every queued frame to be tracked.
    pub fn finish(self) -> Result<Vec<FrameOutput>, TrackingError> {
        drop(self.sender);
        self.handle.join().map_err(|_| TrackingError::WorkerPanicked)
    }
}
