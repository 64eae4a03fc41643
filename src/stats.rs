use chrono::Local;

use crate::gesture::TransitionEvent;

/// A single action attempt with metadata.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub action: String,
    pub transition: TransitionEvent,
    pub succeeded: bool,
    pub timestamp: String,
}

/// Session statistics, kept in memory for the shutdown summary.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub frames: u64,
    pub transitions: usize,
    pub actions_performed: usize,
    pub actions_failed: usize,
    pub history: Vec<ActionRecord>,
}

impl Stats {
    pub fn record_transition(&mut self) {
        self.transitions += 1;
    }

    pub fn record_action(&mut self, action: &str, transition: TransitionEvent, succeeded: bool) {
        if succeeded {
            self.actions_performed += 1;
        } else {
            self.actions_failed += 1;
        }
        self.history.push(ActionRecord {
            action: action.to_string(),
            transition,
            succeeded,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }

    pub fn log_summary(&self) {
        log::info!(
            "Session: {} frames, {} transitions, {} actions performed, {} failed",
            self.frames,
            self.transitions,
            self.actions_performed,
            self.actions_failed
        );
        for record in &self.history {
            log::debug!(
                "{} {} on {} ({})",
                record.timestamp,
                record.action,
                record.transition,
                if record.succeeded { "ok" } else { "failed" }
            );
        }
    }
}
