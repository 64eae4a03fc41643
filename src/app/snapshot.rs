use std::sync::Arc;

use tokio::sync::watch;

use crate::gesture::Gesture;

/// What the display sees: the latest gesture and, optionally, its frame.
#[derive(Debug)]
pub struct DisplaySnapshot<F> {
    pub gesture: Gesture,
    pub frame: Option<Arc<F>>,
    /// Number of frames processed when this was published.
    pub sequence: u64,
}

impl<F> Clone for DisplaySnapshot<F> {
    fn clone(&self) -> Self {
        Self {
            gesture: self.gesture,
            frame: self.frame.clone(),
            sequence: self.sequence,
        }
    }
}

impl<F> Default for DisplaySnapshot<F> {
    fn default() -> Self {
        Self {
            gesture: Gesture::Unknown,
            frame: None,
            sequence: 0,
        }
    }
}

/// Last-write-wins slot. One writer; readers get whole snapshots only.
pub struct SnapshotPublisher<F> {
    tx: watch::Sender<DisplaySnapshot<F>>,
    publish_frames: bool,
}

impl<F> SnapshotPublisher<F> {
    pub fn new(publish_frames: bool) -> Self {
        let (tx, _rx) = watch::channel(DisplaySnapshot::default());
        Self { tx, publish_frames }
    }

    /// Replace the current snapshot. Works with no readers attached.
    pub fn publish(&self, gesture: Gesture, frame: F, sequence: u64) {
        let frame = self.publish_frames.then(|| Arc::new(frame));
        self.tx.send_replace(DisplaySnapshot {
            gesture,
            frame,
            sequence,
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplaySnapshot<F>> {
        self.tx.subscribe()
    }
}
