//! Shell command gate.
//!
//! A name-based heuristic: only the first whitespace-delimited token of the
//! command line is compared against the blocklist. Shell operators are not
//! parsed, so `ls && rm -rf /` passes the gate. This is a known limitation of
//! the rule, not something the gate tries to detect.

use super::error::SandboxError;
use serde::{Deserialize, Serialize};

/// Destructive or privilege-escalating commands.
pub const DEFAULT_BLOCKED_COMMANDS: &[&str] = &["rm", "del", "sudo", "su", "shutdown", "reboot"];

/// Extra entries for the strict variant: directory/file creation.
pub const STRICT_EXTRA_COMMANDS: &[&str] = &["mkdir", "touch"];

/// Case-sensitive set of executable names that may not be launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBlocklist {
    commands: Vec<String>,
}

impl CommandBlocklist {
    pub fn new(commands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut list = Self {
            commands: Vec::new(),
        };
        list.extend(commands);
        list
    }

    /// The standard blocklist.
    pub fn standard() -> Self {
        Self::new(DEFAULT_BLOCKED_COMMANDS.iter().copied())
    }

    /// The standard blocklist plus file/directory creation commands.
    pub fn strict() -> Self {
        Self::new(
            DEFAULT_BLOCKED_COMMANDS
                .iter()
                .chain(STRICT_EXTRA_COMMANDS.iter())
                .copied(),
        )
    }

    /// Add more names, skipping duplicates and blanks.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = impl Into<String>>) {
        for command in commands {
            let command = command.into();
            let command = command.trim();
            if !command.is_empty() && !self.contains(command) {
                self.commands.push(command.to_string());
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c == name)
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Check a command line against this blocklist.
    pub fn check(&self, command_line: &str) -> Result<(), SandboxError> {
        check(command_line, self)
    }
}

impl Default for CommandBlocklist {
    fn default() -> Self {
        Self::standard()
    }
}

/// The candidate executable name: the first whitespace-delimited token.
pub fn command_name(command_line: &str) -> Option<&str> {
    command_line.split_whitespace().next()
}

/// Allow or block `command_line` based on its first token.
///
/// An empty command line has no executable name and is allowed; the shell
/// decides what to do with it.
pub fn check(command_line: &str, blocklist: &CommandBlocklist) -> Result<(), SandboxError> {
    match command_name(command_line) {
        Some(name) if blocklist.contains(name) => Err(SandboxError::Blocked(name.to_string())),
        _ => Ok(()),
    }
}
