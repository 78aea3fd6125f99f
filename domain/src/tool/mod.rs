//! Tool domain module
//!
//! Defines the contracts for the agent's three local tools and the rules a
//! call must pass before it reaches a handler.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolRequest  │───▶│ ToolResult   │
//! │ (declared)   │    │ (untrusted)  │    │ (validated)  │    │ (one text)   │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! A tool never fails across this boundary: every outcome, including sandbox
//! rejections and cancellation, is a [`ToolResult`] whose text becomes the
//! next observation for the reasoning engine.
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): Port trait for tool execution
//! - **Infrastructure** (`LocalToolExecutor`): File I/O and process spawning

pub mod entities;
pub mod request;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use request::{EXECUTE_SHELL_COMMAND, READ_FILE, ToolRequest, WRITE_FILE, builtin_tool_spec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
