//! Application layer for toolpilot
//!
//! This crate contains the turn executor and the port definitions it drives.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    attachments::{AttachmentError, AttachmentSource},
    progress::{NoTurnProgress, TurnProgressNotifier},
    reasoning::{ReasoningContext, ReasoningEngine, ReasoningError, ReasoningStep},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::run_turn::{RunTurnInput, RunTurnOutput, RunTurnUseCase, TurnError};
