//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolpilot_domain::TurnLimits;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_iterations = 10           # tool calls per turn
/// max_execution_secs = 120      # wall-clock budget per turn
/// retry_malformed_output = true # feed parse errors back to the engine
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: usize,
    pub max_execution_secs: u64,
    pub retry_malformed_output: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: TurnLimits::DEFAULT_MAX_ITERATIONS,
            max_execution_secs: TurnLimits::DEFAULT_MAX_EXECUTION_SECS,
            retry_malformed_output: true,
        }
    }
}

impl FileAgentConfig {
    pub fn to_turn_limits(&self) -> TurnLimits {
        TurnLimits::new(
            self.max_iterations,
            Duration::from_secs(self.max_execution_secs),
        )
        .with_retry_malformed_output(self.retry_malformed_output)
    }
}
