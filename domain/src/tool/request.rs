//! The closed set of tools and their validated argument shapes.
//!
//! The reasoning engine names tools with free-form strings. A [`ToolCall`]
//! only becomes a [`ToolRequest`] after the name is found in the declared
//! [`ToolSpec`] and the arguments pass [`DefaultToolValidator`]; anything else is
//! turned into an `INVALID_ARGUMENT` or `NOT_FOUND` result at the boundary.

use super::entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
use super::traits::{DefaultToolValidator, ToolValidator};
use super::value_objects::ToolError;

pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const EXECUTE_SHELL_COMMAND: &str = "execute_shell_command";

/// A validated request for one of the three built-in tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    ReadFile { path: String },
    WriteFile { path: String, content: String },
    ExecuteShell { command: String },
}

impl ToolRequest {
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolRequest::ReadFile { .. } => READ_FILE,
            ToolRequest::WriteFile { .. } => WRITE_FILE,
            ToolRequest::ExecuteShell { .. } => EXECUTE_SHELL_COMMAND,
        }
    }

    /// Short description for progress output.
    pub fn summary(&self) -> String {
        match self {
            ToolRequest::ReadFile { path } => path.clone(),
            ToolRequest::WriteFile { path, content } => {
                format!("{} ({} bytes)", path, content.len())
            }
            ToolRequest::ExecuteShell { command } => command.clone(),
        }
    }

    /// Validate `call` against `spec` and build the typed request.
    pub fn from_call(call: &ToolCall, spec: &ToolSpec) -> Result<Self, ToolError> {
        let definition = spec.get(&call.tool_name).ok_or_else(|| {
            ToolError::not_found(format!(
                "Unknown tool '{}'. Available tools: {}",
                call.tool_name,
                spec.names().collect::<Vec<_>>().join(", ")
            ))
        })?;

        DefaultToolValidator
            .validate(call, definition)
            .map_err(ToolError::invalid_argument)?;

        let arg = |key: &str| {
            call.require_string(key)
                .map(str::to_string)
                .map_err(ToolError::invalid_argument)
        };

        match call.tool_name.as_str() {
            READ_FILE => Ok(ToolRequest::ReadFile { path: arg("path")? }),
            WRITE_FILE => Ok(ToolRequest::WriteFile {
                path: arg("path")?,
                content: arg("content")?,
            }),
            EXECUTE_SHELL_COMMAND => Ok(ToolRequest::ExecuteShell {
                command: arg("command")?,
            }),
            other => Err(ToolError::not_found(format!(
                "Tool '{}' has no built-in handler",
                other
            ))),
        }
    }
}

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the contents of a file. Use this to analyze code or check what a file contains.",
    )
    .with_parameter(
        ToolParameter::new(
            "path",
            "Path of the file to read, relative to the working directory (e.g. ./src/main.rs)",
            true,
        )
        .with_type("path"),
    )
}

pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Create a file or overwrite its contents. Use this when writing or modifying code.",
    )
    .with_parameter(ToolParameter::new("path", "Path of the file to write", true).with_type("path"))
    .with_parameter(ToolParameter::new(
        "content",
        "The complete content to store in the file",
        true,
    ))
}

pub fn execute_shell_command_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXECUTE_SHELL_COMMAND,
        "Run a terminal (shell) command in the working directory and return its output. \
         Use for system checks such as ls, pwd, date, or build commands.",
    )
    .with_parameter(ToolParameter::new(
        "command",
        "The shell command to run (e.g. ls -la)",
        true,
    ))
}

/// The three built-in tools, in declaration order.
pub fn builtin_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(read_file_definition())
        .register(write_file_definition())
        .register(execute_shell_command_definition())
}
