//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on use.

mod agent;
mod provider;
mod repl;
mod sandbox;

pub use agent::FileAgentConfig;
pub use provider::FileProviderConfig;
pub use repl::{DEFAULT_HISTORY_FILE, FileReplConfig};
pub use sandbox::FileSandboxConfig;

use crate::reasoning::ProviderKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("agent.max_iterations cannot be 0")]
    ZeroIterations,

    #[error("agent.max_execution_secs cannot be 0")]
    ZeroExecutionTime,

    #[error("provider.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("unknown provider '{0}' (expected openai, gemini or ollama)")]
    UnknownProvider(String),

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("sandbox.shell cannot be empty")]
    EmptyShell,

    #[error("repl.history_size cannot be 0")]
    ZeroHistorySize,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Turn limits
    pub agent: FileAgentConfig,
    /// Blocklist and shell
    pub sandbox: FileSandboxConfig,
    /// Reasoning engine endpoint
    pub provider: FileProviderConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.agent.max_iterations == 0 {
            return Err(ConfigValidationError::ZeroIterations);
        }
        if self.agent.max_execution_secs == 0 {
            return Err(ConfigValidationError::ZeroExecutionTime);
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider.kind.parse::<ProviderKind>().is_err() {
            return Err(ConfigValidationError::UnknownProvider(
                self.provider.kind.clone(),
            ));
        }
        if self
            .provider
            .model
            .as_deref()
            .is_some_and(|m| m.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self
            .sandbox
            .shell
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyShell);
        }
        if self.repl.history_size == 0 {
            return Err(ConfigValidationError::ZeroHistorySize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[agent]
max_iterations = 5
max_execution_secs = 30
retry_malformed_output = false

[sandbox]
strict_blocklist = true
extra_blocked_commands = ["dd"]
shell = "bash -c"

[provider]
kind = "ollama"
model = "qwen2.5-coder:7b"
temperature = 0.2

[repl]
history_file = "/tmp/history"
history_size = 50
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());

        let limits = config.agent.to_turn_limits();
        assert_eq!(limits.max_iterations, 5);
        assert_eq!(limits.max_execution_time, Duration::from_secs(30));
        assert!(!limits.retry_malformed_output);

        let blocklist = config.sandbox.to_blocklist();
        assert!(blocklist.contains("touch"));
        assert!(blocklist.contains("dd"));
        assert_eq!(config.sandbox.to_shell().program(), "bash");

        assert_eq!(config.provider.kind, "ollama");
        assert_eq!(config.provider.timeout_secs, 120);
        assert_eq!(config.repl.history_size, 50);
        assert_eq!(config.repl.attachment_max_chars, 1_000_000);
    }

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.max_execution_secs, 120);
        assert!(!config.sandbox.to_blocklist().contains("mkdir"));
        assert_eq!(config.repl.history_size, 100);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = FileConfig::default();
        config.agent.max_iterations = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroIterations));

        let mut config = FileConfig::default();
        config.agent.max_execution_secs = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroExecutionTime)
        );

        let mut config = FileConfig::default();
        config.provider.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.provider.kind = "bedrock".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownProvider("bedrock".to_string()))
        );

        let mut config = FileConfig::default();
        config.provider.model = Some("  ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.sandbox.shell = Some(String::new());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyShell));
    }
}
