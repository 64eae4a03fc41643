use super::state_machine::{Gesture, GestureTracker, TransitionEvent};

/// Wraps a tracker so a new gesture must be seen on `required` consecutive
/// frames before it is forwarded. `required <= 1` forwards every frame.
#[derive(Debug)]
pub struct DebouncedStateMachine<T> {
    inner: T,
    required: u32,
    candidate: Gesture,
    streak: u32,
}

impl<T: GestureTracker> DebouncedStateMachine<T> {
    pub fn new(inner: T, required: u32) -> Self {
        Self {
            candidate: inner.current(),
            inner,
            required: required.max(1),
            streak: 0,
        }
    }
}

impl<T: GestureTracker> GestureTracker for DebouncedStateMachine<T> {
    fn update(&mut self, gesture: Gesture) -> Option<TransitionEvent> {
        if gesture == self.inner.current() {
            self.candidate = gesture;
            self.streak = 0;
            return None;
        }
        if gesture == self.candidate {
            self.streak += 1;
        } else {
            self.candidate = gesture;
            self.streak = 1;
        }
        if self.streak < self.required {
            return None;
        }
        self.streak = 0;
        self.inner.update(gesture)
    }

    fn current(&self) -> Gesture {
        self.inner.current()
    }
}
