//! Mapping gesture transitions to external actions.
//!
//! The dispatcher runs on the frame delivery thread, so it never performs an
//! action itself. Matching transitions are handed to a bounded queue and a
//! worker on the tokio runtime invokes the [`ActionSink`].

mod command;

use std::collections::HashMap;
use std::fmt;

use crate::gesture::{Gesture, TransitionEvent};

pub use command::{ActionCommand, CommandSink};

/// Failure to perform an action. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No command is configured for this action id.
    UnknownAction(String),
    /// The external program could not be started.
    Spawn { program: String, reason: String },
    /// The external program ran but reported failure.
    ExitStatus { program: String, status: String },
    /// Too many actions already waiting to run.
    QueueFull,
    /// The dispatcher has been shut down.
    Closed,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction(id) => write!(f, "no command configured for action '{id}'"),
            Self::Spawn { program, reason } => write!(f, "failed to spawn {program}: {reason}"),
            Self::ExitStatus { program, status } => {
                write!(f, "{program} exited with status {status}")
            }
            Self::QueueFull => f.write_str("action queue is full"),
            Self::Closed => f.write_str("action dispatcher is shut down"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Performs an action by id. Implementations may block; they are always
/// called off the frame delivery thread.
pub trait ActionSink: Send + Sync + 'static {
    fn perform(&self, action: &str) -> Result<(), ActionError>;
}

/// Transition table: `(from, to)` pairs bound to action ids.
#[derive(Debug, Clone, Default)]
pub struct ActionBindings {
    table: HashMap<(Gesture, Gesture), String>,
}

impl ActionBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a directed pair. A later bind for the same pair replaces it.
    pub fn bind(&mut self, from: Gesture, to: Gesture, action: impl Into<String>) {
        if from == to {
            log::warn!("Ignoring binding for self-transition {from} -> {to}");
            return;
        }
        self.table.insert((from, to), action.into());
    }

    /// Bind both directions between `a` and `b` to the same action.
    #[cfg(test)]
    pub fn bind_both(&mut self, a: Gesture, b: Gesture, action: impl Into<String>) {
        let action = action.into();
        self.bind(a, b, action.clone());
        self.bind(b, a, action);
    }

    pub fn lookup(&self, event: &TransitionEvent) -> Option<&str> {
        self.table.get(&(event.from, event.to)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// One action waiting for the worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub action: String,
    pub event: TransitionEvent,
}

/// What the dispatcher did with a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// No binding for this transition.
    Unmapped,
    /// Handed to the worker.
    Queued(String),
    /// Bound, but could not be handed off.
    Rejected(String, ActionError),
}

/// Edge-triggered dispatcher. Does not retry or deduplicate; each transition
/// it receives is queued at most once.
pub struct ActionDispatcher {
    bindings: ActionBindings,
    queue: async_channel::Sender<ActionRequest>,
}

impl ActionDispatcher {
    /// Create a dispatcher and the receiving end the worker drains.
    pub fn new(
        bindings: ActionBindings,
        capacity: usize,
    ) -> (Self, async_channel::Receiver<ActionRequest>) {
        let (queue, rx) = async_channel::bounded(capacity.max(1));
        (Self { bindings, queue }, rx)
    }

    /// Never blocks.
    pub fn on_transition(&self, event: TransitionEvent) -> Dispatch {
        let Some(action) = self.bindings.lookup(&event) else {
            log::debug!("No action bound to {event}");
            return Dispatch::Unmapped;
        };
        let request = ActionRequest {
            action: action.to_string(),
            event,
        };
        match self.queue.try_send(request) {
            Ok(()) => {
                log::debug!("Queued action '{action}' for {event}");
                Dispatch::Queued(action.to_string())
            }
            Err(async_channel::TrySendError::Full(_)) => {
                Dispatch::Rejected(action.to_string(), ActionError::QueueFull)
            }
            Err(async_channel::TrySendError::Closed(_)) => {
                Dispatch::Rejected(action.to_string(), ActionError::Closed)
            }
        }
    }

    /// Stop accepting requests. Already queued requests stay receivable.
    pub fn close(&self) {
        self.queue.close();
    }

    /// Sending half of the queue; closing it closes the dispatcher too.
    pub fn sender(&self) -> async_channel::Sender<ActionRequest> {
        self.queue.clone()
    }
}
