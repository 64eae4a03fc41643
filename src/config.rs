use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::action::{ActionBindings, ActionCommand};
use crate::gesture::{Gesture, DEFAULT_MIN_CONFIDENCE};

pub const TOGGLE_OVERVIEW: &str = "toggle_overview";

/// A transition bound to an action id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub from: Gesture,
    pub to: Gesture,
    pub action: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transition table; unmapped pairs do nothing.
    pub bindings: Vec<BindingConfig>,
    /// Action id → program to run.
    pub actions: HashMap<String, ActionCommand>,
    /// Joints below this confidence count as missing.
    pub min_confidence: f32,
    /// Consecutive frames required before a transition (1 = every frame).
    pub debounce_frames: u32,
    /// Include the frame itself in display snapshots.
    pub publish_frames: bool,
    /// Source reports y growing upward (bottom-left origin).
    pub flip_vertical: bool,
    pub action_queue_capacity: usize,
    pub shutdown_grace_ms: u64,
    /// Pace file replays to this rate. `None` delivers as fast as read.
    pub replay_fps: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        let mut actions = HashMap::new();
        actions.insert(TOGGLE_OVERVIEW.to_string(), ActionCommand::toggle_overview());
        Self {
            bindings: vec![
                BindingConfig {
                    from: Gesture::Closed,
                    to: Gesture::Open,
                    action: TOGGLE_OVERVIEW.into(),
                },
                BindingConfig {
                    from: Gesture::Open,
                    to: Gesture::Closed,
                    action: TOGGLE_OVERVIEW.into(),
                },
            ],
            actions,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            debounce_frames: 1,
            publish_frames: true,
            flip_vertical: false,
            action_queue_capacity: 16,
            shutdown_grace_ms: 2000,
            replay_fps: None,
        }
    }
}

impl Config {
    /// Directory: ~/.config/palm-switch/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("palm-switch");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => Self::from_json(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {}: {e}, using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }

    /// Build the transition table. Bindings to actions with no command are
    /// kept; the sink reports them when they fire.
    pub fn action_bindings(&self) -> ActionBindings {
        let mut bindings = ActionBindings::new();
        for b in &self.bindings {
            if !self.actions.contains_key(&b.action) {
                log::warn!("Binding {} -> {} uses unknown action '{}'", b.from, b.to, b.action);
            }
            bindings.bind(b.from, b.to, b.action.clone());
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::TransitionEvent;

    #[test]
    fn test_default_binds_both_directions() {
        let bindings = Config::default().action_bindings();
        assert_eq!(bindings.len(), 2);
        for (from, to) in [(Gesture::Closed, Gesture::Open), (Gesture::Open, Gesture::Closed)] {
            assert_eq!(bindings.lookup(&TransitionEvent { from, to }), Some(TOGGLE_OVERVIEW));
        }
        assert_eq!(
            bindings.lookup(&TransitionEvent { from: Gesture::Unknown, to: Gesture::Open }),
            None
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json(r#"{"debounce_frames": 3, "publish_frames": false}"#).unwrap();
        assert_eq!(config.debounce_frames, 3);
        assert!(!config.publish_frames);
        assert_eq!(config.min_confidence, DEFAULT_MIN_CONFIDENCE);
        assert_eq!(config.bindings.len(), 2);
    }

    #[test]
    fn test_custom_bindings() {
        let config = Config::from_json(
            r#"{
                "bindings": [{"from": "closed", "to": "open", "action": "screenshot"}],
                "actions": {"screenshot": {"program": "scrot"}}
            }"#,
        )
        .unwrap();
        let bindings = config.action_bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.lookup(&TransitionEvent { from: Gesture::Closed, to: Gesture::Open }),
            Some("screenshot")
        );
        assert_eq!(config.actions["screenshot"].args, Vec::<String>::new());
    }

    #[test]
    fn test_invalid_gesture_name_is_rejected() {
        assert!(Config::from_json(r#"{"bindings": [{"from": "fist", "to": "open", "action": "x"}]}"#).is_err());
    }

    #[test]
    fn test_roundtrip_preserves_bindings() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(back.bindings, config.bindings);
        assert_eq!(back.actions, config.actions);
    }
}
