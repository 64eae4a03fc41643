use serde::{Deserialize, Serialize};

/// Classified state of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Open,
    Closed,
    /// No hand, or a hand that is neither fully open nor fully closed.
    #[default]
    Unknown,
}

impl Gesture {
    /// Status text for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown => "none",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change in classified gesture between two consecutive updates.
/// `from != to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionEvent {
    pub from: Gesture,
    pub to: Gesture,
}

impl std::fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Anything that consumes one gesture per frame and reports transitions.
pub trait GestureTracker: Send {
    fn update(&mut self, gesture: Gesture) -> Option<TransitionEvent>;
    fn current(&self) -> Gesture;
}

/// Edge-triggered gesture state. Single writer: only `update` mutates it.
#[derive(Debug, Default)]
pub struct GestureStateMachine {
    current: Gesture,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GestureTracker for GestureStateMachine {
    fn update(&mut self, gesture: Gesture) -> Option<TransitionEvent> {
        if gesture == self.current {
            return None;
        }
        let event = TransitionEvent {
            from: self.current,
            to: gesture,
        };
        self.current = gesture;
        Some(event)
    }

    fn current(&self) -> Gesture {
        self.current
    }
}
