//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default history file name, placed in the home directory
pub const DEFAULT_HISTORY_FILE: &str = ".toolpilot_history";

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Number of history entries kept
    pub history_size: usize,
    /// Attachments longer than this many characters are cut
    pub attachment_max_chars: usize,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            history_size: 100,
            attachment_max_chars: 1_000_000,
        }
    }
}

impl FileReplConfig {
    /// Configured history path, or `~/.toolpilot_history`.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE)),
        }
    }
}
