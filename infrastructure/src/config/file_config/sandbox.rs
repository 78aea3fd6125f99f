//! Sandbox configuration from TOML (`[sandbox]` section)

use crate::tools::ShellCommand;
use serde::{Deserialize, Serialize};
use toolpilot_domain::CommandBlocklist;

/// Raw sandbox configuration from TOML
///
/// # Example
///
/// ```toml
/// [sandbox]
/// strict_blocklist = true              # also block mkdir and touch
/// extra_blocked_commands = ["dd", "chmod"]
/// shell = "bash -c"                    # default: "sh -c" / "powershell.exe -NoProfile -Command"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSandboxConfig {
    pub strict_blocklist: bool,
    pub extra_blocked_commands: Vec<String>,
    /// Shell override; the command line is appended as the last argument
    pub shell: Option<String>,
}

impl FileSandboxConfig {
    pub fn to_blocklist(&self) -> CommandBlocklist {
        let mut blocklist = if self.strict_blocklist {
            CommandBlocklist::strict()
        } else {
            CommandBlocklist::standard()
        };
        blocklist.extend(self.extra_blocked_commands.iter().cloned());
        blocklist
    }

    /// The configured shell, or the platform default.
    pub fn to_shell(&self) -> ShellCommand {
        self.shell
            .as_deref()
            .and_then(ShellCommand::parse)
            .unwrap_or_default()
    }
}
