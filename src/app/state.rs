use crate::action::ActionError;
use crate::config::Config;
use crate::gesture::TransitionEvent;
use crate::stats::Stats;

/// Events sent from the delivery thread and the action worker to the
/// event handler loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Transition(TransitionEvent),
    ActionPerformed {
        action: String,
        event: TransitionEvent,
    },
    ActionFailed {
        action: String,
        event: TransitionEvent,
        error: ActionError,
    },
    /// The landmark source stopped; carries the reason if it failed.
    SourceEnded(Option<String>),
}

/// State owned by the event handler loop. Never touched by the delivery thread.
pub struct AppState {
    pub config: Config,
    pub stats: Stats,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: Stats::default(),
        }
    }
}
