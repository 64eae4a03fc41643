use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::process::{Command, Stdio};

use super::{ActionError, ActionSink};

/// An external program bound to an action id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ActionCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Default command for toggling the desktop overview.
    /// Mission Control on macOS, the GNOME Shell overview on Linux.
    pub fn toggle_overview() -> Self {
        #[cfg(target_os = "macos")]
        let cmd = Self::new("open", &["-a", "Mission Control"]);

        #[cfg(not(target_os = "macos"))]
        let cmd = Self::new(
            "dbus-send",
            &[
                "--session",
                "--type=method_call",
                "--dest=org.gnome.Shell",
                "/org/gnome/Shell",
                "org.freedesktop.DBus.Properties.Set",
                "string:org.gnome.Shell",
                "string:OverviewActive",
                "variant:boolean:true",
            ],
        );

        cmd
    }
}

/// Runs the configured program for an action and waits for it to exit.
#[derive(Debug, Clone, Default)]
pub struct CommandSink {
    commands: HashMap<String, ActionCommand>,
}

impl CommandSink {
    pub fn new(commands: HashMap<String, ActionCommand>) -> Self {
        Self { commands }
    }
}

impl ActionSink for CommandSink {
    fn perform(&self, action: &str) -> Result<(), ActionError> {
        let cmd = self
            .commands
            .get(action)
            .ok_or_else(|| ActionError::UnknownAction(action.to_string()))?;

        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ActionError::Spawn {
                program: cmd.program.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ActionError::ExitStatus {
                program: cmd.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
