//! Parsing engine replies into [`ReasoningStep`]s.

use super::prompt::FINAL_ANSWER;
use serde_json::Value;
use toolpilot_application::{ReasoningError, ReasoningStep};
use toolpilot_domain::ToolCall;

/// Extract the JSON blob from a reply: the first fenced block if any,
/// otherwise the outermost `{ ... }` span.
fn extract_blob(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```") {
        let after_fence = &text[start + 3..];
        // Skip an optional language tag on the fence line.
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        if let Some(end) = body.find("```") {
            let candidate = body[..end].trim();
            if candidate.starts_with('{') {
                return Some(candidate);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse one engine reply.
pub fn parse_action(text: &str) -> Result<ReasoningStep, ReasoningError> {
    let blob = extract_blob(text)
        .ok_or_else(|| ReasoningError::malformed("no JSON blob found in reply", text))?;

    let value: Value = serde_json::from_str(blob)
        .map_err(|e| ReasoningError::malformed(format!("invalid JSON: {}", e), text))?;

    let action = value
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| ReasoningError::malformed("missing string field \"action\"", text))?;
    let input = value.get("action_input").cloned().unwrap_or(Value::Null);

    if action == FINAL_ANSWER {
        let answer = match input {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
        };
        return Ok(ReasoningStep::FinalAnswer(answer));
    }

    match input {
        Value::Object(arguments) => {
            let call = arguments
                .into_iter()
                .fold(ToolCall::new(action), |call, (k, v)| call.with_arg(k, v));
            Ok(ReasoningStep::ToolRequest(call))
        }
        _ => Err(ReasoningError::malformed(
            format!("\"action_input\" for tool '{}' must be a JSON object", action),
            text,
        )),
    }
}
