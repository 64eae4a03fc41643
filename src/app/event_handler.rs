use super::state::{AppEvent, AppState};

/// Handle one event. Returns `false` once the session should end.
pub fn handle_app_event(state: &mut AppState, event: AppEvent) -> bool {
    match event {
        AppEvent::Transition(transition) => {
            log::debug!("Gesture transition: {transition}");
            state.stats.record_transition();
        }
        AppEvent::ActionPerformed { action, event } => {
            log::info!("Performed '{action}' on {event}");
            state.stats.record_action(&action, event, true);
        }
        AppEvent::ActionFailed {
            action,
            event,
            error,
        } => {
            log::warn!("Action '{action}' for {event} failed: {error}");
            state.stats.record_action(&action, event, false);
        }
        AppEvent::SourceEnded(None) => {
            log::info!("Landmark source finished");
            return false;
        }
        AppEvent::SourceEnded(Some(reason)) => {
            log::error!("Landmark source failed: {reason}");
            return false;
        }
    }
    true
}
