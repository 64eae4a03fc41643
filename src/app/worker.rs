use std::sync::Arc;

use super::state::AppEvent;
use crate::action::{ActionRequest, ActionSink};

/// Drain action requests in order, running each on the blocking pool.
/// Returns once the queue is closed and empty.
pub async fn run_action_worker(
    requests: async_channel::Receiver<ActionRequest>,
    sink: Arc<dyn ActionSink>,
    events: async_channel::Sender<AppEvent>,
) {
    while let Ok(ActionRequest { action, event }) = requests.recv().await {
        let sink = sink.clone();
        let id = action.clone();
        let result = tokio::task::spawn_blocking(move || sink.perform(&id)).await;

        let outcome = match result {
            Ok(Ok(())) => AppEvent::ActionPerformed { action, event },
            Ok(Err(error)) => AppEvent::ActionFailed {
                action,
                event,
                error,
            },
            Err(e) => {
                log::error!("Action task panicked: {e}");
                AppEvent::ActionFailed {
                    action: action.clone(),
                    event,
                    error: crate::action::ActionError::Spawn {
                        program: action,
                        reason: format!("task panicked: {e}"),
                    },
                }
            }
        };
        let _ = events.send(outcome).await;
    }
    log::info!("Action worker stopped");
}
