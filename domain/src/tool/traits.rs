//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Every declared parameter of the built-in tools is a string, so any
/// non-string value is rejected along with missing and unknown arguments.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        if call.tool_name != definition.name {
            return Err(format!(
                "Tool call '{}' does not match definition '{}'",
                call.tool_name, definition.name
            ));
        }

        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        // Sorted so the reported argument is deterministic
        let mut names: Vec<&String> = call.arguments.keys().collect();
        names.sort();

        for arg_name in names {
            if definition.parameter(arg_name).is_none() {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
            if !call.arguments[arg_name].is_string() {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be a string",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}
