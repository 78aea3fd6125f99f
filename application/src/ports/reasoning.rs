//! Reasoning engine port
//!
//! Defines the interface for the collaborator that decides, step by step,
//! whether to call a tool or answer.

use async_trait::async_trait;
use thiserror::Error;
use toolpilot_domain::{ScratchEntry, ToolCall, ToolSpec, Turn};

/// Errors that can occur while asking the engine for its next step
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReasoningError {
    /// The engine could not be reached or refused the request
    #[error("Transport error: {0}")]
    Transport(String),

    /// The engine answered, but not in the expected shape
    #[error("Could not parse engine output: {reason}")]
    Malformed { reason: String, raw: String },
}

impl ReasoningError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ReasoningError::Malformed { .. })
    }
}

/// The engine's decision for one step.
#[derive(Debug, Clone, PartialEq)]
pub enum ReasoningStep {
    ToolRequest(ToolCall),
    FinalAnswer(String),
}

/// Everything the engine sees when deciding a step.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningContext<'a> {
    /// The user input driving the current turn
    pub input: &'a str,
    /// Completed turns, oldest first
    pub history: &'a [Turn],
    /// Tool calls made so far in this turn and what they returned
    pub scratchpad: &'a [ScratchEntry],
    /// Tools the engine may request
    pub tools: &'a ToolSpec,
}

/// Port for the reasoning collaborator
///
/// Implementations (adapters) live in the infrastructure layer.
/// Cancellation is handled by the caller dropping the returned future.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    async fn next_step(
        &self,
        context: ReasoningContext<'_>,
    ) -> Result<ReasoningStep, ReasoningError>;
}
