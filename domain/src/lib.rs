//! Domain layer for toolpilot
//!
//! This crate contains the core rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sandbox
//!
//! Every filesystem access is resolved against the session's
//! [`BaseDirectory`] and rejected if it leaves it. Shell commands are screened
//! by a name blocklist before anything is spawned.
//!
//! ## Turn
//!
//! One user input drives one turn: the reasoning engine alternates between
//! requesting tools and reading their observations until it produces a final
//! answer, bounded by [`TurnLimits`]. Only completed turns reach the
//! [`ConversationStore`].

pub mod agent;
pub mod conversation;
pub mod core;
pub mod sandbox;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{ScratchEntry, Scratchpad, TurnBound, TurnLimits, TurnPhase};
pub use conversation::{Attachment, ConversationStore, Turn};
pub use sandbox::{BaseDirectory, CommandBlocklist, SandboxError, SandboxedPath};
pub use session::{Message, Role};
pub use tool::{
    DefaultToolValidator, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolRequest,
    ToolResult, ToolResultMetadata, ToolSpec, ToolValidator, builtin_tool_spec,
};
