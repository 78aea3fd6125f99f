//! Tool Executor port
//!
//! Defines the interface for executing tools (file operations, commands).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use toolpilot_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute a tool call.
    ///
    /// Never fails: validation errors, sandbox rejections and I/O errors are
    /// all reported inside the [`ToolResult`]. When `cancel` fires, the
    /// implementation stops any work it started and returns a `CANCELED`
    /// result.
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolResult;
}
