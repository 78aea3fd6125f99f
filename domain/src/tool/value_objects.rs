//! Tool domain value objects: immutable result and error types
//!
//! Every tool invocation produces exactly one [`ToolResult`]. Failures are
//! carried as a [`ToolError`] inside the result instead of aborting the turn,
//! so the reasoning engine sees them as ordinary observations and can adapt.
//!
//! | Code | Raised for |
//! |------|------------|
//! | `INVALID_ARGUMENT` | Schema violation (missing/unknown/non-string argument) |
//! | `NOT_FOUND` | Unknown tool, missing file |
//! | `OUT_OF_BOUNDS` | Path escapes the base directory |
//! | `BLOCKED` | Command rejected by the blocklist |
//! | `PERMISSION_DENIED` | OS refused access |
//! | `EXECUTION_FAILED` | Other I/O or spawn failure |
//! | `CANCELED` | The enclosing turn was canceled mid-call |

use crate::sandbox::SandboxError;
use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "BLOCKED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const OUT_OF_BOUNDS: &'static str = "OUT_OF_BOUNDS";
    pub const BLOCKED: &'static str = "BLOCKED";
    pub const PERMISSION_DENIED: &'static str = "PERMISSION_DENIED";
    pub const EXECUTION_FAILED: &'static str = "EXECUTION_FAILED";
    pub const CANCELED: &'static str = "CANCELED";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            Self::PERMISSION_DENIED,
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(Self::EXECUTION_FAILED, message)
    }

    pub fn canceled() -> Self {
        Self::new(Self::CANCELED, "Execution canceled by user")
    }

    /// Build from an I/O error, mapping the common kinds to their codes.
    pub fn from_io(context: &str, resource: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(resource),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(resource),
            _ => Self::execution_failed(format!("{}: {}", context, error)),
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.code == Self::CANCELED
    }
}

impl From<SandboxError> for ToolError {
    fn from(error: SandboxError) -> Self {
        let code = match &error {
            SandboxError::OutOfBounds { .. } => Self::OUT_OF_BOUNDS,
            SandboxError::Blocked(_) => Self::BLOCKED,
            SandboxError::InvalidBaseDirectory { .. } => Self::EXECUTION_FAILED,
        };
        Self::new(code, error.to_string())
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
///
/// | Tool | `duration_ms` | `bytes` | `path` | `exit_code` |
/// |------|:---:|:---:|:---:|:---:|
/// | `read_file` | yes | yes | yes | - |
/// | `write_file` | yes | yes | yes | - |
/// | `execute_shell_command` | yes | yes | - | yes |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of bytes processed/returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// For file operations: the resolved path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// For command execution: exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    pub fn is_canceled(&self) -> bool {
        self.error.as_ref().is_some_and(ToolError::is_canceled)
    }

    /// The single text payload handed back to the reasoning engine.
    pub fn observation(&self) -> String {
        match (&self.output, &self.error) {
            (_, Some(error)) => format!("Error: {}", error.message),
            (Some(output), None) => output.clone(),
            (None, None) => String::new(),
        }
    }
}
