//! Agent domain value objects

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bounds applied to every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLimits {
    /// Maximum number of tool calls (ToolPending cycles) per turn
    pub max_iterations: usize,
    /// Wall-clock budget for the whole turn
    pub max_execution_time: Duration,
    /// Feed unparseable engine output back as an observation instead of
    /// failing the turn. Each retry consumes one iteration.
    pub retry_malformed_output: bool,
}

impl TurnLimits {
    pub const DEFAULT_MAX_ITERATIONS: usize = 10;
    pub const DEFAULT_MAX_EXECUTION_SECS: u64 = 120;

    pub fn new(max_iterations: usize, max_execution_time: Duration) -> Self {
        Self {
            max_iterations,
            max_execution_time,
            retry_malformed_output: true,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_execution_time(mut self, max_execution_time: Duration) -> Self {
        self.max_execution_time = max_execution_time;
        self
    }

    pub fn with_retry_malformed_output(mut self, retry: bool) -> Self {
        self.retry_malformed_output = retry;
        self
    }
}

impl Default for TurnLimits {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ITERATIONS,
            Duration::from_secs(Self::DEFAULT_MAX_EXECUTION_SECS),
        )
    }
}

/// Which bound a turn ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnBound {
    Iterations(usize),
    ExecutionTime(Duration),
}

impl std::fmt::Display for TurnBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnBound::Iterations(n) => write!(f, "iteration limit of {} reached", n),
            TurnBound::ExecutionTime(d) => {
                write!(f, "time limit of {}s reached", d.as_secs_f64())
            }
        }
    }
}
