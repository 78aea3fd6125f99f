//! Configuration file loading for toolpilot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLPILOT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolpilot.toml` or `./.toolpilot.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/toolpilot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_HISTORY_FILE, FileAgentConfig, FileConfig, FileProviderConfig,
    FileReplConfig, FileSandboxConfig,
};
pub use loader::ConfigLoader;
