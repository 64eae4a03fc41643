mod classifier;
mod debounce;
mod landmarks;
mod state_machine;

pub use classifier::{GestureClassifier, DEFAULT_MIN_CONFIDENCE};
pub use debounce::DebouncedStateMachine;
pub use landmarks::{HandLandmarks, LandmarkPoint};
pub use state_machine::{Gesture, GestureStateMachine, GestureTracker, TransitionEvent};

#[cfg(test)]
pub(crate) use classifier::make_hand;
#[cfg(test)]
pub(crate) use landmarks::Joint;

/// Build the tracker the pipeline runs: the plain state machine, or the
/// debounced variant when more than one frame is required.
pub fn build_tracker(debounce_frames: u32) -> Box<dyn GestureTracker> {
    if debounce_frames > 1 {
        Box::new(DebouncedStateMachine::new(GestureStateMachine::new(), debounce_frames))
    } else {
        Box::new(GestureStateMachine::new())
    }
}
