//! Agent domain entities

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Phase of a single turn.
///
/// ```text
/// Idle ─▶ Reasoning ─▶ (ToolPending ─▶ Reasoning)* ─▶ Finalizing ─▶ Done
///              │                │
///              └──────┬─────────┘
///                     ▼
///             Canceled | Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    /// Waiting on the reasoning engine
    Reasoning,
    /// A tool call is running
    ToolPending,
    /// Final answer received, recording the turn
    Finalizing,
    Done,
    Canceled,
    Failed,
}

impl TurnPhase {
    pub fn as_str(&self) -> &str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::Reasoning => "reasoning",
            TurnPhase::ToolPending => "tool_pending",
            TurnPhase::Finalizing => "finalizing",
            TurnPhase::Done => "done",
            TurnPhase::Canceled => "canceled",
            TurnPhase::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            TurnPhase::Idle => "Idle",
            TurnPhase::Reasoning => "Thinking",
            TurnPhase::ToolPending => "Running tool",
            TurnPhase::Finalizing => "Finalizing",
            TurnPhase::Done => "Done",
            TurnPhase::Canceled => "Canceled",
            TurnPhase::Failed => "Failed",
        }
    }

    /// Terminal phases never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnPhase::Done | TurnPhase::Canceled | TurnPhase::Failed
        )
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        match (self, next) {
            (Idle, Reasoning) => true,
            (Reasoning, ToolPending | Finalizing) => true,
            (ToolPending, Reasoning) => true,
            (Finalizing, Done) => true,
            (Reasoning | ToolPending, Canceled | Failed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One step of intermediate work inside a turn: the call the engine made
/// and the observation it got back.
///
/// `call` is `None` when the engine produced output that could not be parsed;
/// the observation then carries the parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchEntry {
    pub call: Option<ToolCall>,
    pub observation: String,
}

impl ScratchEntry {
    pub fn tool(call: ToolCall, observation: impl Into<String>) -> Self {
        Self {
            call: Some(call),
            observation: observation.into(),
        }
    }

    pub fn malformed(observation: impl Into<String>) -> Self {
        Self {
            call: None,
            observation: observation.into(),
        }
    }
}

/// Working scratchpad of a turn. Discarded when the turn ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scratchpad {
    entries: Vec<ScratchEntry>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScratchEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScratchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
