//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of history entries kept on disk
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show a spinner while the engine is thinking
    pub show_progress: bool,
    /// Path to history file; no history is kept when `None`
    pub history_file: Option<PathBuf>,
    /// Most recent entries kept in the history file
    pub history_size: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}
