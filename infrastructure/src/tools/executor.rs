//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! [`LocalToolExecutor`] bridges the application layer's abstract port with
//! actual system operations. Every call goes through the same path:
//!
//! ```text
//! ToolExecutorPort::execute(call, cancel)
//!   ├─ ToolRequest::from_call()   unknown tool / schema violation → failure result
//!   ├─ ReadFile      → file::execute_read_file()      (path sandbox)
//!   ├─ WriteFile     → file::execute_write_file()     (path sandbox)
//!   └─ ExecuteShell  → command::execute_shell_command() (command gate)
//! ```

use async_trait::async_trait;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use toolpilot_application::ports::tool_executor::ToolExecutorPort;
use toolpilot_domain::tool::{
    builtin_tool_spec,
    entities::{ToolCall, ToolSpec},
    request::ToolRequest,
    value_objects::ToolResult,
};
use toolpilot_domain::{BaseDirectory, CommandBlocklist};
use tracing::debug;

use super::command::{self, ShellCommand};
use super::file;

/// Executor that runs tools on the local machine.
///
/// Holds a shared handle to the session's [`BaseDirectory`]; changes made
/// through that handle apply to the next tool call.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
    base: BaseDirectory,
    blocklist: CommandBlocklist,
    shell: ShellCommand,
}

impl LocalToolExecutor {
    /// Create an executor with the three built-in tools, the standard
    /// blocklist and the platform shell.
    pub fn new(base: BaseDirectory) -> Self {
        Self {
            tool_spec: builtin_tool_spec(),
            base,
            blocklist: CommandBlocklist::standard(),
            shell: ShellCommand::platform_default(),
        }
    }

    pub fn with_blocklist(mut self, blocklist: CommandBlocklist) -> Self {
        self.blocklist = blocklist;
        self
    }

    pub fn with_shell(mut self, shell: ShellCommand) -> Self {
        self.shell = shell;
        self
    }

    pub fn base_directory(&self) -> &BaseDirectory {
        &self.base
    }

    pub fn blocklist(&self) -> &CommandBlocklist {
        &self.blocklist
    }

    async fn dispatch(&self, request: ToolRequest, cancel: &CancellationToken) -> ToolResult {
        match request {
            ToolRequest::ReadFile { path } => file::execute_read_file(&self.base, &path, cancel).await,
            ToolRequest::WriteFile { path, content } => {
                file::execute_write_file(&self.base, &path, &content, cancel).await
            }
            ToolRequest::ExecuteShell { command } => {
                command::execute_shell_command(
                    &self.base,
                    &self.blocklist,
                    &self.shell,
                    &command,
                    cancel,
                )
                .await
            }
        }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolResult {
        let start = Instant::now();

        let request = match ToolRequest::from_call(call, &self.tool_spec) {
            Ok(r) => r,
            Err(e) => {
                debug!("Rejected tool call '{}': {}", call.tool_name, e);
                return ToolResult::failure(&call.tool_name, e);
            }
        };

        debug!("Executing {}: {}", request.tool_name(), request.summary());
        let mut result = self.dispatch(request, cancel).await;
        if result.metadata.duration_ms.is_none() {
            result.metadata.duration_ms = Some(start.elapsed().as_millis() as u64);
        }
        result
    }
}
