use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use super::snapshot::{DisplaySnapshot, SnapshotPublisher};
use super::state::AppEvent;
use crate::action::{ActionDispatcher, ActionRequest, Dispatch};
use crate::gesture::{GestureClassifier, GestureTracker, HandLandmarks, TransitionEvent};

/// Classify → update → dispatch → publish, once per delivered frame.
///
/// Owned by the delivery thread, so the tracker has exactly one writer.
/// Nothing on this path blocks: actions are queued for the worker and
/// events go out on an unbounded channel.
///
/// The display snapshot carries the tracker's stable state, which equals the
/// per-frame classification unless debouncing is enabled.
pub struct FramePipeline<F> {
    classifier: GestureClassifier,
    tracker: Box<dyn GestureTracker>,
    dispatcher: ActionDispatcher,
    snapshot: SnapshotPublisher<F>,
    events: async_channel::Sender<AppEvent>,
    frames: u64,
    stopped: Arc<AtomicBool>,
}

impl<F> FramePipeline<F> {
    pub fn new(
        classifier: GestureClassifier,
        tracker: Box<dyn GestureTracker>,
        dispatcher: ActionDispatcher,
        publish_frames: bool,
        events: async_channel::Sender<AppEvent>,
    ) -> Self {
        Self {
            classifier,
            tracker,
            dispatcher,
            snapshot: SnapshotPublisher::new(publish_frames),
            events,
            frames: 0,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Process one frame in arrival order. Returns the transition it caused,
    /// if any. Frames delivered after shutdown are ignored.
    pub fn on_frame(&mut self, frame: F, hand: Option<&HandLandmarks>) -> Option<TransitionEvent> {
        if self.is_stopped() {
            return None;
        }
        self.frames += 1;

        let gesture = self.classifier.classify(hand);
        let transition = self.tracker.update(gesture);

        if let Some(event) = transition {
            let _ = self.events.try_send(AppEvent::Transition(event));
            if let Dispatch::Rejected(action, error) = self.dispatcher.on_transition(event) {
                let _ = self.events.try_send(AppEvent::ActionFailed {
                    action,
                    event,
                    error,
                });
            }
        }

        self.snapshot.publish(self.tracker.current(), frame, self.frames);
        transition
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplaySnapshot<F>> {
        self.snapshot.subscribe()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Stop accepting frames and close the action queue.
    pub fn shutdown(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            log::info!("Frame pipeline shutting down");
        }
        self.dispatcher.close();
    }

    /// Handle that can stop the pipeline from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stopped: self.stopped.clone(),
            queue: self.dispatcher.sender(),
        }
    }
}

#[derive(Clone)]
pub struct ShutdownHandle {
    stopped: Arc<AtomicBool>,
    queue: async_channel::Sender<ActionRequest>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            log::info!("Frame pipeline shutting down");
        }
        self.queue.close();
    }
}
